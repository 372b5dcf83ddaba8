pub(crate) mod charge_model;
