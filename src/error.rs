// error.rs - Host binding failures
//
// Only the browser glue can fail; the sequencer and field are infallible.

pub type HostResult<T> = Result<T, HostError>;

#[derive(thiserror::Error, Debug)]
pub enum HostError {
    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("canvas #{0} not found")]
    NoCanvas(String),

    #[error("canvas has no 2d context")]
    NoContext,

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("js error: {0}")]
    Js(String),
}

impl From<wasm_bindgen::JsValue> for HostError {
    fn from(v: wasm_bindgen::JsValue) -> Self {
        Self::Js(format!("{v:?}"))
    }
}

impl From<HostError> for wasm_bindgen::JsValue {
    fn from(e: HostError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_stable() {
        assert_eq!(HostError::NoCanvas("neural-bg".into()).to_string(), "canvas #neural-bg not found");
        assert!(HostError::Js("boom".into()).to_string().starts_with("js error:"));

        let bad = serde_json::from_str::<u32>("x").unwrap_err();
        assert!(HostError::from(bad).to_string().starts_with("invalid config:"));
    }
}
