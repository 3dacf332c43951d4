use serde::{Deserialize, Serialize};

/// The name fields a person carries. Only `name` is mandatory.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NameParts {
    pub name: String,
    pub surname: Option<String>,
    pub middle_name: Option<String>,
    pub second_last_name: Option<String>,
    pub nickname: Option<String>,
}

impl NameParts {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_surname(mut self, surname: impl Into<String>) -> Self {
        self.surname = Some(surname.into());
        self
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Short label used for graph nodes: the nickname when there is one,
/// otherwise first name and surname.
pub fn format_graph_name(parts: &NameParts) -> String {
    if let Some(nickname) = non_blank(&parts.nickname) {
        return nickname.to_string();
    }

    match non_blank(&parts.surname) {
        Some(surname) => format!("{} {}", parts.name.trim(), surname),
        None => parts.name.trim().to_string(),
    }
}

/// Every name part in reading order, with the nickname quoted at the end.
pub fn format_full_name(parts: &NameParts) -> String {
    let mut full = [
        Some(parts.name.trim()).filter(|n| !n.is_empty()),
        non_blank(&parts.middle_name),
        non_blank(&parts.surname),
        non_blank(&parts.second_last_name),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" ");

    if let Some(nickname) = non_blank(&parts.nickname) {
        if full.is_empty() {
            full = format!("\"{}\"", nickname);
        } else {
            full.push_str(&format!(" \"{}\"", nickname));
        }
    }

    full
}
