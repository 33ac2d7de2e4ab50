use crate::{session::SessionConfig, templates::Templates};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) session: SessionConfig,
    pub(crate) templates: Templates,
}
