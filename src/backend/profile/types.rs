/**
 * Profile Request and Response Types
 */

use serde::{Deserialize, Serialize};

use crate::shared::{parse_skills, Profile, ProfileUpdate, PublicUser, Social, User};

/// Skills arrive either as a comma-separated string or as a list
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(untagged)]
pub enum SkillsInput {
    Text(String),
    List(Vec<String>),
}

impl SkillsInput {
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::List(items) => items.iter().all(|s| s.trim().is_empty()),
        }
    }

    pub fn into_skills(self) -> Vec<String> {
        match self {
            Self::Text(text) => parse_skills(&text),
            Self::List(items) => items.iter().map(|s| s.trim().to_string()).collect(),
        }
    }
}

/// Body of POST /api/profile
///
/// Social links are flat fields, as the web form sends them.
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct ProfileRequest {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    pub githubusername: Option<String>,
    pub skills: Option<SkillsInput>,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

impl ProfileRequest {
    /// Turn a validated request into a merge update
    ///
    /// Blank strings count as absent, so they never overwrite stored values.
    /// The social links are always rebuilt from this request alone.
    pub fn into_update(self) -> ProfileUpdate {
        ProfileUpdate {
            company: non_blank(self.company),
            website: non_blank(self.website),
            location: non_blank(self.location),
            bio: non_blank(self.bio),
            status: non_blank(self.status),
            githubusername: non_blank(self.githubusername),
            skills: self
                .skills
                .filter(|skills| !skills.is_blank())
                .map(SkillsInput::into_skills),
            social: Social {
                youtube: non_blank(self.youtube),
                twitter: non_blank(self.twitter),
                facebook: non_blank(self.facebook),
                linkedin: non_blank(self.linkedin),
                instagram: non_blank(self.instagram),
            },
        }
    }
}

/// Body of PUT /api/profile/experience
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct ExperienceRequest {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

/// Body of PUT /api/profile/education
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct EducationRequest {
    pub school: Option<String>,
    pub degree: Option<String>,
    pub fieldofstudy: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

/// A profile with its owner's public details in place of the bare user id
#[derive(Serialize, Debug)]
pub struct ProfileView {
    /// Every `Profile` field except `user`
    #[serde(flatten)]
    pub profile: serde_json::Map<String, serde_json::Value>,
    /// `null` when the owning account no longer exists
    pub user: Option<PublicUser>,
}

impl ProfileView {
    pub fn new(profile: &Profile, owner: Option<&User>) -> Result<Self, serde_json::Error> {
        let mut fields = match serde_json::to_value(profile)? {
            serde_json::Value::Object(fields) => fields,
            _ => serde_json::Map::new(),
        };
        fields.remove("user");

        Ok(Self {
            profile: fields,
            user: owner.map(PublicUser::from),
        })
    }
}

/// Response of DELETE /api/profile
#[derive(Serialize, Debug)]
pub struct AccountDeleted {
    pub msg: &'static str,
    pub user: User,
    pub profile: Profile,
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
