use std::{collections::BTreeMap, fmt, sync::Arc};

#[derive(Debug, Clone)]
pub struct ViewError {
    pub key: &'static str,
    pub args: BTreeMap<&'static str, String>,
    pub causes: Vec<ViewCause>,
}

#[derive(Debug, Clone)]
pub enum ViewCause {
    View(Box<ViewError>),
    Std(Arc<dyn std::error::Error + Send + Sync>),
}

impl ViewError {
    pub fn new(key: &'static str) -> Self {
        Self {
            key,
            args: BTreeMap::new(),
            causes: Vec::new(),
        }
    }

    pub fn with_arg(mut self, k: &'static str, v: impl ToString) -> Self {
        self.args.insert(k, v.to_string());
        self
    }

    pub fn push_view(mut self, cause: ViewError) -> Self {
        self.causes.push(ViewCause::View(Box::new(cause)));
        self
    }

    pub fn push_std(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.causes.push(ViewCause::Std(Arc::new(cause)));
        self
    }
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.key)?;
        let mut first = true;
        for (k, v) in &self.args {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{k}={v}")?;
        }
        write!(f, ")")
    }
}

impl std::error::Error for ViewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.causes.iter().find_map(|c| match c {
            ViewCause::View(e) => Some(e.as_ref() as &dyn std::error::Error),
            ViewCause::Std(e) => Some(e.as_ref() as &dyn std::error::Error),
        })
    }
}

impl From<serde_json::Error> for ViewError {
    fn from(err: serde_json::Error) -> Self {
        ViewError::new("json-error")
            .with_arg("line", err.line())
            .with_arg("column", err.column())
            .push_std(err)
    }
}

impl From<confy::ConfyError> for ViewError {
    fn from(err: confy::ConfyError) -> Self {
        ViewError::new("settings-store-error").push_std(err)
    }
}
