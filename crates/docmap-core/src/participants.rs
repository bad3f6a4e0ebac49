//! Participant records for Docmap actions.
//!
//! Review articles are credited to an anonymous peer reviewer;
//! evaluation summaries are credited to the named editors and senior
//! editors of the version, in input order.

use serde::Serialize;

use crate::record::{EditorDetails, ManuscriptVersion};

/// An actor with a role in an action.
#[derive(Debug, Clone, Serialize)]
pub struct Participant {
    pub actor: Actor,
    pub role: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Actor {
    Anonymous(AnonymousActor),
    Named(NamedActor),
}

#[derive(Debug, Clone, Serialize)]
pub struct AnonymousActor {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub actor_type: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct NamedActor {
    #[serde(rename = "type")]
    pub actor_type: &'static str,
    pub name: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "_middleName", skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub surname: String,
    #[serde(
        rename = "_relatesToOrganization",
        skip_serializing_if = "Option::is_none"
    )]
    pub relates_to_organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliation: Option<Affiliation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Affiliation {
    #[serde(rename = "type")]
    pub affiliation_type: &'static str,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// The anonymous peer reviewer attached to every review-article action.
pub fn anonymous_reviewer() -> Participant {
    Participant {
        actor: Actor::Anonymous(AnonymousActor {
            name: "anonymous",
            actor_type: "person",
        }),
        role: "peer-reviewer",
    }
}

/// A named editor or senior editor.
pub fn editor_participant(details: &EditorDetails, role: &'static str) -> Participant {
    let relates_to_organization = match (&details.institution, &details.country) {
        (Some(institution), Some(country)) => Some(format!("{institution}, {country}")),
        (Some(institution), None) => Some(institution.clone()),
        (None, Some(country)) => Some(country.clone()),
        (None, None) => None,
    };

    let affiliation = details.institution.as_ref().map(|institution| Affiliation {
        affiliation_type: "organization",
        name: institution.clone(),
        location: match (&details.city, &details.country) {
            (Some(city), Some(country)) => Some(format!("{city}, {country}")),
            (None, Some(country)) => Some(country.clone()),
            _ => None,
        },
    });

    Participant {
        actor: Actor::Named(NamedActor {
            actor_type: "person",
            name: details.name.clone(),
            first_name: details.first_name.clone(),
            middle_name: details.middle_name.clone(),
            surname: details.last_name.clone(),
            relates_to_organization,
            affiliation,
        }),
        role,
    }
}

/// Participants for an evaluation-summary action: editors first, then
/// senior editors, both in input order.
pub fn evaluation_summary_participants(version: &ManuscriptVersion) -> Vec<Participant> {
    version
        .editor_details
        .iter()
        .map(|details| editor_participant(details, "editor"))
        .chain(
            version
                .senior_editor_details
                .iter()
                .map(|details| editor_participant(details, "senior-editor")),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn editor(institution: Option<&str>, country: Option<&str>, city: Option<&str>) -> EditorDetails {
        EditorDetails {
            name: "Ada Lovelace".to_string(),
            first_name: "Ada".to_string(),
            middle_name: None,
            last_name: "Lovelace".to_string(),
            institution: institution.map(str::to_string),
            country: country.map(str::to_string),
            city: city.map(str::to_string),
        }
    }

    #[test]
    fn anonymous_reviewer_shape() {
        let value = serde_json::to_value(anonymous_reviewer()).unwrap();
        assert_eq!(
            value,
            json!({
                "actor": {"name": "anonymous", "type": "person"},
                "role": "peer-reviewer",
            })
        );
    }

    #[test]
    fn organization_combines_institution_and_country() {
        let p = editor_participant(&editor(Some("MRC LMB"), Some("UK"), Some("Cambridge")), "editor");
        let value = serde_json::to_value(p).unwrap();
        assert_eq!(value["actor"]["_relatesToOrganization"], "MRC LMB, UK");
        assert_eq!(value["actor"]["affiliation"]["location"], "Cambridge, UK");
        assert_eq!(value["actor"]["affiliation"]["name"], "MRC LMB");
        assert_eq!(value["actor"]["affiliation"]["type"], "organization");
    }

    #[test]
    fn organization_falls_back_to_single_side() {
        let p = editor_participant(&editor(Some("MRC LMB"), None, None), "editor");
        let value = serde_json::to_value(p).unwrap();
        assert_eq!(value["actor"]["_relatesToOrganization"], "MRC LMB");
        assert!(value["actor"]["affiliation"].get("location").is_none());

        let p = editor_participant(&editor(None, Some("UK"), None), "editor");
        let value = serde_json::to_value(p).unwrap();
        assert_eq!(value["actor"]["_relatesToOrganization"], "UK");
        assert!(value["actor"].get("affiliation").is_none());
    }

    #[test]
    fn organization_omitted_when_both_absent() {
        let p = editor_participant(&editor(None, None, None), "editor");
        let value = serde_json::to_value(p).unwrap();
        assert!(value["actor"].get("_relatesToOrganization").is_none());
    }

    #[test]
    fn city_without_country_gives_no_location() {
        let p = editor_participant(&editor(Some("MRC LMB"), None, Some("Cambridge")), "editor");
        let value = serde_json::to_value(p).unwrap();
        assert!(value["actor"]["affiliation"].get("location").is_none());
    }
}
