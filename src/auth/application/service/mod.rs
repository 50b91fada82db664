pub(crate) mod login_service;
