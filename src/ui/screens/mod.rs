mod failure;
mod loading;

pub(crate) use failure::render_failure;
pub(crate) use loading::render_loading;
