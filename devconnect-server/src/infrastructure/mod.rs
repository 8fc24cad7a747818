pub(crate) mod avatar;
pub(crate) mod database;
pub(crate) mod github;
pub(crate) mod jwt;
pub(crate) mod logging;
pub(crate) mod settings;
