pub const LABEL_NAMES: [&str; 3] = ["route", "method", "status"];

/// Status value carried by the tuple until the response status is known.
pub const STATUS_PENDING: &str = "none";

/// `route` is the matched template (e.g. `/users/:id`), never the literal path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabelTuple {
    route: String,
    method: String,
    status: String,
}

impl LabelTuple {
    pub fn pending(route: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            method: method.into(),
            status: STATUS_PENDING.to_string(),
        }
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_status(&mut self, code: u16) {
        self.status.clear();
        self.status.push_str(&code.to_string());
    }

    /// Values ordered to match [`LABEL_NAMES`].
    pub fn values(&self) -> [&str; 3] {
        [&self.route, &self.method, &self.status]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    ClientError,
    ServerError,
}

impl Outcome {
    /// 1xx, 3xx and out-of-range codes are unclassified.
    pub fn classify(status: u16) -> Option<Self> {
        if (200..=299).contains(&status) {
            Some(Outcome::Success)
        } else if (500..=599).contains(&status) {
            Some(Outcome::ServerError)
        } else if (400..=499).contains(&status) {
            Some(Outcome::ClientError)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::ClientError => "client_error",
            Outcome::ServerError => "server_error",
        }
    }
}
