pub(crate) mod backend;
pub(crate) mod composite;
pub(crate) mod cpu;
