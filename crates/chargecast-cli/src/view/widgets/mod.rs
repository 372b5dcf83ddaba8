pub use self::{
    choice_row::ChoiceRow,
    key_binding_display::{KeyBinding, KeyBindingDisplay},
};

mod choice_row;
mod key_binding_display;
