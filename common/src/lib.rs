//! Models shared between the personality block frontend and the upload backend.

pub mod model;
