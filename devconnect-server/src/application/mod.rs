pub(crate) mod auth_service;
pub(crate) mod post_service;
pub(crate) mod profile_service;
