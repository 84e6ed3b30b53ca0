pub(crate) mod diff;
pub(crate) mod new;
pub(crate) mod questions;
pub(crate) mod render;
pub(crate) mod revise;
pub(crate) mod show;
pub(crate) mod templates;
pub(crate) mod validate;
