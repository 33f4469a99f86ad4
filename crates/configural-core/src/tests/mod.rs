pub(crate) mod integration;
