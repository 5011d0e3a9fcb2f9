/// Project submission routes.
pub(crate) mod submissions;

/// Team registration and listing routes.
pub(crate) mod teams;
