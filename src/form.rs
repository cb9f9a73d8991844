//! Form state: named inputs with per-input validity and one aggregate flag.
//!
//! DESIGN
//! ======
//! All transitions go through the pure `form_reducer`, so aggregation is
//! testable without any UI. `FormHook` only owns the current value and feeds
//! actions through the reducer. Validity itself is computed by the caller.

use std::collections::BTreeMap;

use crate::http::FileUpload;

// =============================================================================
// INPUTS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputValue {
    Text(String),
    File(FileUpload),
}

impl InputValue {
    #[must_use]
    pub fn empty() -> Self {
        Self::Text(String::new())
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::File(_) => None,
        }
    }

    #[must_use]
    pub fn as_file(&self) -> Option<&FileUpload> {
        match self {
            Self::File(file) => Some(file),
            Self::Text(_) => None,
        }
    }
}

impl From<&str> for InputValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for InputValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<FileUpload> for InputValue {
    fn from(value: FileUpload) -> Self {
        Self::File(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputState {
    pub value: InputValue,
    pub is_valid: bool,
}

impl InputState {
    #[must_use]
    pub fn new(value: impl Into<InputValue>, is_valid: bool) -> Self {
        Self { value: value.into(), is_valid }
    }

    /// Empty text input that has not passed validation yet.
    #[must_use]
    pub fn blank() -> Self {
        Self { value: InputValue::empty(), is_valid: false }
    }
}

pub type Inputs = BTreeMap<String, InputState>;

// =============================================================================
// STATE + REDUCER
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub inputs: Inputs,
    pub is_valid: bool,
}

impl FormState {
    #[must_use]
    pub fn input(&self, id: &str) -> Option<&InputState> {
        self.inputs.get(id)
    }

    #[must_use]
    pub fn text(&self, id: &str) -> Option<&str> {
        self.inputs.get(id).and_then(|input| input.value.as_text())
    }

    #[must_use]
    pub fn file(&self, id: &str) -> Option<&FileUpload> {
        self.inputs.get(id).and_then(|input| input.value.as_file())
    }

    #[must_use]
    pub fn is_input_valid(&self, id: &str) -> bool {
        self.inputs.get(id).is_some_and(|input| input.is_valid)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    /// One input changed; aggregate validity is recomputed.
    InputChange { id: String, value: InputValue, is_valid: bool },
    /// The whole input set is replaced and the aggregate given explicitly.
    SetData { inputs: Inputs, form_validity: bool },
}

/// Apply one action to a form state, returning the next state.
#[must_use]
pub fn form_reducer(state: &FormState, action: FormAction) -> FormState {
    match action {
        FormAction::InputChange { id, value, is_valid } => {
            let mut inputs = state.inputs.clone();
            inputs.insert(id, InputState { value, is_valid });
            let is_valid = inputs.values().all(|input| input.is_valid);
            FormState { inputs, is_valid }
        }
        FormAction::SetData { inputs, form_validity } => FormState { inputs, is_valid: form_validity },
    }
}

// =============================================================================
// HOOK
// =============================================================================

/// Owner of one form's state, created with the initial inputs of a view.
#[derive(Debug, Clone)]
pub struct FormHook {
    state: FormState,
}

impl FormHook {
    #[must_use]
    pub fn new(initial_inputs: Inputs, initial_form_validity: bool) -> Self {
        Self { state: FormState { inputs: initial_inputs, is_valid: initial_form_validity } }
    }

    #[must_use]
    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn input_handler(&mut self, id: &str, value: impl Into<InputValue>, is_valid: bool) {
        self.dispatch(FormAction::InputChange { id: id.to_string(), value: value.into(), is_valid });
    }

    pub fn set_form_data(&mut self, inputs: Inputs, form_validity: bool) {
        self.dispatch(FormAction::SetData { inputs, form_validity });
    }

    pub fn dispatch(&mut self, action: FormAction) {
        self.state = form_reducer(&self.state, action);
    }
}

/// Build an `Inputs` map from `(id, state)` pairs.
pub fn inputs<I, K>(pairs: I) -> Inputs
where
    I: IntoIterator<Item = (K, InputState)>,
    K: Into<String>,
{
    pairs.into_iter().map(|(id, input)| (id.into(), input)).collect()
}

#[cfg(test)]
#[path = "form_test.rs"]
mod tests;
