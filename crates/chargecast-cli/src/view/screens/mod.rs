pub(crate) use self::{form::FormScreen, result::ResultScreen};

mod form;
mod result;
