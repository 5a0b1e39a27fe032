/* src/server/core/rust/src/dictionary/mod.rs */

//! Typed locale dictionaries.
//!
//! A dictionary is loaded wholesale per locale. Loading rejects unknown keys
//! and empty leaf strings, so a `Dictionary` obtained from `from_json` always
//! has display text for every key. `Dictionary::default()` is the blank
//! placeholder rendered before (or instead of) a successful load.

mod resolver;
mod source;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::FolioError;
use crate::locale::Locale;

pub use resolver::{LocaleResolver, Resolved};
pub use source::{BundledSource, DictionarySource, DirSource};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Dictionary {
  pub menu: MenuText,
  pub content: ContentText,
  pub form: FormText,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MenuText {
  pub name: String,
  pub home: String,
  pub about: String,
  pub resume: String,
  pub skills: String,
  pub projects: String,
  pub services: String,
  pub contact: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentText {
  pub about: AboutText,
  pub resume: ResumeText,
  pub skills: TitleText,
  pub projects: ProjectsText,
  pub services: ServicesText,
  pub contact: TitleText,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TitleText {
  pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AboutText {
  pub title: String,
  pub main: String,
  pub text: String,
  pub keys: AboutFacts,
  pub values: AboutFacts,
}

/// Label/value pairs share one shape; `keys` holds labels, `values` the data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AboutFacts {
  pub name: String,
  pub dob: String,
  pub address: String,
  pub email: String,
  pub phone: String,
}

impl AboutFacts {
  pub fn entries(&self) -> [&str; 5] {
    [&self.name, &self.dob, &self.address, &self.email, &self.phone]
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResumeText {
  pub title: String,
  pub download: String,
  pub keys: ResumeFacts,
  pub values: ResumeFacts,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ResumeFacts {
  pub frontend: String,
  pub projects: String,
  pub work_experience: String,
  pub skills: String,
  pub soft_skills: String,
}

impl ResumeFacts {
  pub fn entries(&self) -> [&str; 5] {
    [&self.frontend, &self.projects, &self.work_experience, &self.skills, &self.soft_skills]
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectsText {
  pub title: String,
  pub descriptions: ProjectDescriptions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ProjectDescriptions {
  pub todo: String,
  pub weather_app: String,
  pub khashimelk: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServicesText {
  pub title: String,
  pub subtitle: String,
  pub text: ServiceList,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceList {
  pub service1: String,
  pub service2: String,
  pub service3: String,
  pub service4: String,
  pub service5: String,
}

impl ServiceList {
  pub fn entries(&self) -> [&str; 5] {
    [&self.service1, &self.service2, &self.service3, &self.service4, &self.service5]
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct FormText {
  pub full_name: String,
  pub email: String,
  pub phone_number: String,
  pub message: String,
  pub place_holder: FormFields,
  pub submit: SubmitText,
  pub messages: OutcomeText,
  pub errors: FieldErrorText,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct FormFields {
  pub full_name: String,
  pub email: String,
  pub phone_number: String,
  pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubmitText {
  pub submit: String,
  pub sending: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutcomeText {
  pub success: String,
  pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct FieldErrorText {
  pub full_name: String,
  pub email: EmailErrorText,
  pub phone_number: PhoneErrorText,
  pub message: MessageErrorText,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct EmailErrorText {
  pub required: String,
  pub invalid_email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct PhoneErrorText {
  pub required: String,
  pub invalid_number: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct MessageErrorText {
  pub required: String,
  pub min_length: String,
}

impl Dictionary {
  /// Parse and validate a locale document.
  pub fn from_json(locale: Locale, json: &str) -> Result<Self, FolioError> {
    let value: Value = serde_json::from_str(json)
      .map_err(|e| FolioError::dictionary(format!("{locale}: invalid JSON: {e}")))?;

    let mut blank = Vec::new();
    collect_blank_leaves(&value, "", &mut blank);
    if !blank.is_empty() {
      return Err(FolioError::dictionary(format!(
        "{locale}: empty text for {}",
        blank.join(", ")
      )));
    }

    serde_json::from_value(value).map_err(|e| FolioError::dictionary(format!("{locale}: {e}")))
  }

  /// Every leaf as a dotted key, e.g. `content.about.title`.
  pub fn flatten(&self) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    if let Ok(value) = serde_json::to_value(self) {
      flatten_into(&value, "", &mut out);
    }
    out
  }

  /// Look up one display string by dotted key.
  pub fn lookup(&self, key: &str) -> Option<String> {
    let value = serde_json::to_value(self).ok()?;
    let mut current = &value;
    for segment in key.split('.') {
      current = current.get(segment)?;
    }
    current.as_str().map(str::to_string)
  }

  /// True when no leaf carries text (the placeholder state).
  pub fn is_blank(&self) -> bool {
    self.flatten().values().all(String::is_empty)
  }
}

fn join_key(prefix: &str, key: &str) -> String {
  if prefix.is_empty() { key.to_string() } else { format!("{prefix}.{key}") }
}

fn collect_blank_leaves(value: &Value, prefix: &str, out: &mut Vec<String>) {
  match value {
    Value::Object(map) => {
      for (k, v) in map {
        collect_blank_leaves(v, &join_key(prefix, k), out);
      }
    }
    Value::String(s) if s.trim().is_empty() => out.push(prefix.to_string()),
    _ => {}
  }
}

fn flatten_into(value: &Value, prefix: &str, out: &mut BTreeMap<String, String>) {
  match value {
    Value::Object(map) => {
      for (k, v) in map {
        flatten_into(v, &join_key(prefix, k), out);
      }
    }
    Value::String(s) => {
      out.insert(prefix.to_string(), s.clone());
    }
    _ => {}
  }
}
