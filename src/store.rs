pub(crate) mod planet;
