/**
 * Profile Model
 *
 * A developer profile: one per user, with scalar details, a skills list,
 * social links and newest-first experience and education histories.
 */

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Social links, keyed by platform
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Social {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

/// One job in the experience history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Experience {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    pub from: NaiveDate,
    #[serde(default)]
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub description: Option<String>,
}

/// One school in the education history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Education {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    pub from: NaiveDate,
    #[serde(default)]
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub description: Option<String>,
}

/// Profile document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Owning user
    pub user: Uuid,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub githubusername: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub social: Social,
    /// Newest first
    #[serde(default)]
    pub experience: Vec<Experience>,
    /// Newest first
    #[serde(default)]
    pub education: Vec<Education>,
    pub date: DateTime<Utc>,
}

/// Fields supplied by one create-or-update request
///
/// `None` leaves the stored value untouched. `social` is not optional: the
/// stored links are replaced by exactly the links in the request.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    pub githubusername: Option<String>,
    pub skills: Option<Vec<String>>,
    pub social: Social,
}

impl Profile {
    /// Empty profile for a user
    pub fn new(user: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user,
            company: None,
            website: None,
            location: None,
            bio: None,
            status: None,
            githubusername: None,
            skills: Vec::new(),
            social: Social::default(),
            experience: Vec::new(),
            education: Vec::new(),
            date: Utc::now(),
        }
    }

    /// Merge an update into this profile
    pub fn apply(&mut self, update: ProfileUpdate) {
        let ProfileUpdate {
            company,
            website,
            location,
            bio,
            status,
            githubusername,
            skills,
            social,
        } = update;

        merge(&mut self.company, company);
        merge(&mut self.website, website);
        merge(&mut self.location, location);
        merge(&mut self.bio, bio);
        merge(&mut self.status, status);
        merge(&mut self.githubusername, githubusername);
        if let Some(skills) = skills {
            self.skills = skills;
        }
        self.social = social;
    }

    /// Insert an experience entry at the head of the history
    pub fn add_experience(&mut self, entry: Experience) {
        self.experience.insert(0, entry);
    }

    /// Remove the experience entry with the given id
    pub fn remove_experience(&mut self, id: Uuid) -> Option<Experience> {
        let index = self.experience.iter().position(|e| e.id == id)?;
        Some(self.experience.remove(index))
    }

    /// Insert an education entry at the head of the history
    pub fn add_education(&mut self, entry: Education) {
        self.education.insert(0, entry);
    }

    /// Remove the education entry with the given id
    pub fn remove_education(&mut self, id: Uuid) -> Option<Education> {
        let index = self.education.iter().position(|e| e.id == id)?;
        Some(self.education.remove(index))
    }
}

fn merge(slot: &mut Option<String>, value: Option<String>) {
    if value.is_some() {
        *slot = value;
    }
}

/// Split a comma-separated skills string, trimming each entry
pub fn parse_skills(input: &str) -> Vec<String> {
    input.split(',').map(|skill| skill.trim().to_string()).collect()
}
