// Core modules implementing shape resolution, document codec, and error modeling.
pub mod compare;
pub mod decode;
pub mod document;
pub mod error;
pub mod registry;
pub mod variant;
