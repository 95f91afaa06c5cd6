pub(crate) mod player;
pub(crate) mod queue;
