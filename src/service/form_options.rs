/// The form shipped as near-duplicate variants; they collapse into one
/// code path toggled by these options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormOptions {
    /// Collect a multi-entry host email list and block submission while
    /// it is empty.
    pub collect_hosts: bool,
    /// Compose the event title from free text plus a selected category
    /// instead of taking a description field as-is.
    pub compose_title: bool,
    /// Inline room descriptions into the visible option labels.
    pub inline_descriptions: bool,
}

pub const EVENT_CATEGORIES: &[&str] = &["Meeting", "Workshop", "Social", "Talk"];

impl FormOptions {
    /// Single email field, plain description, descriptions as help text only.
    pub fn plain() -> Self {
        Self {
            collect_hosts: false,
            compose_title: false,
            inline_descriptions: false,
        }
    }

    /// Host chip list, composed title, inlined descriptions.
    pub fn rich() -> Self {
        Self {
            collect_hosts: true,
            compose_title: true,
            inline_descriptions: true,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "plain" => Some(Self::plain()),
            "rich" => Some(Self::rich()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_names_resolve() {
        assert_eq!(FormOptions::from_name("plain"), Some(FormOptions::plain()));
        assert_eq!(FormOptions::from_name("rich"), Some(FormOptions::rich()));
        assert_eq!(FormOptions::from_name("fancy"), None);
    }
}
