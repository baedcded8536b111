pub(crate) mod bluetooth;
pub(crate) mod config;
pub(crate) mod flash;
pub(crate) mod logger;
pub(crate) mod time;
