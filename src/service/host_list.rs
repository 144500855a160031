#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddEmailError {
    Empty,
    Invalid,
    Duplicate,
}

impl std::fmt::Display for AddEmailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddEmailError::Empty => write!(f, "Enter an email address"),
            AddEmailError::Invalid => write!(f, "Enter a valid email address"),
            AddEmailError::Duplicate => write!(f, "That email has already been added"),
        }
    }
}

impl std::error::Error for AddEmailError {}

// local@domain.tld: no whitespace, a single '@', and a dot in the domain
// with something on both sides of it.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(|c| c.is_whitespace()) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}

/// Ordered, deduplicated host emails. The first accepted entry is the
/// event's primary host; the rest are additional hosts.
#[derive(Debug, Default, Clone)]
pub struct HostEmailSet {
    emails: Vec<String>,
}

impl HostEmailSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, input: &str) -> Result<(), AddEmailError> {
        let email = input.trim();
        if email.is_empty() {
            return Err(AddEmailError::Empty);
        }
        if !is_valid_email(email) {
            return Err(AddEmailError::Invalid);
        }
        if self.emails.iter().any(|existing| existing == email) {
            return Err(AddEmailError::Duplicate);
        }
        self.emails.push(email.to_string());
        Ok(())
    }

    /// Removes a previously accepted email. Returns false when it was not
    /// in the set.
    pub fn remove(&mut self, email: &str) -> bool {
        let before = self.emails.len();
        self.emails.retain(|existing| existing != email);
        self.emails.len() != before
    }

    pub fn primary(&self) -> Option<&str> {
        self.emails.first().map(String::as_str)
    }

    pub fn additional(&self) -> &[String] {
        if self.emails.len() > 1 {
            &self.emails[1..]
        } else {
            &[]
        }
    }

    pub fn emails(&self) -> &[String] {
        &self.emails
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    pub fn clear(&mut self) {
        self.emails.clear();
    }
}
