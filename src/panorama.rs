pub(crate) mod decode;
pub(crate) mod details;
pub(crate) mod fetch;
pub(crate) mod http;
