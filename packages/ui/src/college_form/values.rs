//! Form values, field validation, and per-tab completion of the college form.

use std::collections::BTreeMap;

use api::models::{College, CollegeInput};
use api::validate::{is_http_url, is_valid_email, is_valid_phone};
use api::{ApiError, FieldError};
use chrono::{Datelike, Utc};

use super::FormTab;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    Name,
    Description,
    CollegeType,
    EstablishedYear,
    LogoUrl,
    Email,
    Phone,
    Website,
    Address,
    City,
    State,
    Country,
    Courses,
    Accreditation,
    Ranking,
    Facilities,
    Facebook,
    Twitter,
    Linkedin,
    Instagram,
}

impl FormField {
    pub const ALL: [FormField; 20] = [
        FormField::Name,
        FormField::Description,
        FormField::CollegeType,
        FormField::EstablishedYear,
        FormField::LogoUrl,
        FormField::Email,
        FormField::Phone,
        FormField::Website,
        FormField::Address,
        FormField::City,
        FormField::State,
        FormField::Country,
        FormField::Courses,
        FormField::Accreditation,
        FormField::Ranking,
        FormField::Facilities,
        FormField::Facebook,
        FormField::Twitter,
        FormField::Linkedin,
        FormField::Instagram,
    ];

    pub fn tab(&self) -> FormTab {
        use FormField::*;
        match self {
            Name | Description | CollegeType | EstablishedYear | LogoUrl => FormTab::Basic,
            Email | Phone | Website | Address | City | State | Country => FormTab::Contact,
            Courses | Accreditation | Ranking | Facilities => FormTab::Academic,
            Facebook | Twitter | Linkedin | Instagram => FormTab::Social,
        }
    }

    /// Fields shown on `tab`, in display order.
    pub fn on_tab(tab: FormTab) -> impl Iterator<Item = FormField> {
        Self::ALL.into_iter().filter(move |f| f.tab() == tab)
    }

    /// Wire name, matching the API's field errors.
    pub fn key(&self) -> &'static str {
        use FormField::*;
        match self {
            Name => "name",
            Description => "description",
            CollegeType => "collegeType",
            EstablishedYear => "establishedYear",
            LogoUrl => "logoUrl",
            Email => "email",
            Phone => "phone",
            Website => "website",
            Address => "address",
            City => "city",
            State => "state",
            Country => "country",
            Courses => "courses",
            Accreditation => "accreditation",
            Ranking => "ranking",
            Facilities => "facilities",
            Facebook => "facebook",
            Twitter => "twitter",
            Linkedin => "linkedin",
            Instagram => "instagram",
        }
    }

    pub fn from_key(key: &str) -> Option<FormField> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    pub fn label(&self) -> &'static str {
        use FormField::*;
        match self {
            Name => "College name",
            Description => "Description",
            CollegeType => "Type",
            EstablishedYear => "Established",
            LogoUrl => "Logo URL",
            Email => "Email",
            Phone => "Phone",
            Website => "Website",
            Address => "Address",
            City => "City",
            State => "State",
            Country => "Country",
            Courses => "Courses (comma separated)",
            Accreditation => "Accreditation",
            Ranking => "Ranking",
            Facilities => "Facilities (comma separated)",
            Facebook => "Facebook",
            Twitter => "Twitter",
            Linkedin => "LinkedIn",
            Instagram => "Instagram",
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(
            self,
            FormField::Name
                | FormField::Description
                | FormField::Email
                | FormField::Phone
                | FormField::Address
        )
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self, FormField::Description | FormField::Address)
    }
}

/// Field errors keyed by field, in display order.
pub type FieldErrors = BTreeMap<FormField, String>;

/// One flag per tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TabCompletion {
    pub basic: bool,
    pub contact: bool,
    pub academic: bool,
    pub social: bool,
}

impl TabCompletion {
    pub fn is_complete(&self, tab: FormTab) -> bool {
        match tab {
            FormTab::Basic => self.basic,
            FormTab::Contact => self.contact,
            FormTab::Academic => self.academic,
            FormTab::Social => self.social,
        }
    }
}

/// Raw text of every input. Lists are kept as comma separated text until submit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CollegeFormValues {
    pub name: String,
    pub description: String,
    pub college_type: String,
    pub established_year: String,
    pub logo_url: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub courses: String,
    pub accreditation: String,
    pub ranking: String,
    pub facilities: String,
    pub facebook: String,
    pub twitter: String,
    pub linkedin: String,
    pub instagram: String,
    pub is_active: bool,
}

impl CollegeFormValues {
    /// Blank form for a new college.
    pub fn new() -> Self {
        Self {
            is_active: true,
            ..Self::default()
        }
    }

    pub fn from_college(college: &College) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            name: college.name.clone(),
            description: college.description.clone(),
            college_type: text(&college.college_type),
            established_year: college
                .established_year
                .map(|y| y.to_string())
                .unwrap_or_default(),
            logo_url: text(&college.logo_url),
            email: text(&college.email),
            phone: text(&college.phone),
            website: text(&college.website),
            address: text(&college.address),
            city: text(&college.city),
            state: text(&college.state),
            country: text(&college.country),
            courses: college.courses.join(", "),
            accreditation: text(&college.accreditation),
            ranking: college.ranking.map(|r| r.to_string()).unwrap_or_default(),
            facilities: college.facilities.join(", "),
            facebook: text(&college.facebook),
            twitter: text(&college.twitter),
            linkedin: text(&college.linkedin),
            instagram: text(&college.instagram),
            is_active: college.is_active,
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        use FormField::*;
        match field {
            Name => &self.name,
            Description => &self.description,
            CollegeType => &self.college_type,
            EstablishedYear => &self.established_year,
            LogoUrl => &self.logo_url,
            Email => &self.email,
            Phone => &self.phone,
            Website => &self.website,
            Address => &self.address,
            City => &self.city,
            State => &self.state,
            Country => &self.country,
            Courses => &self.courses,
            Accreditation => &self.accreditation,
            Ranking => &self.ranking,
            Facilities => &self.facilities,
            Facebook => &self.facebook,
            Twitter => &self.twitter,
            Linkedin => &self.linkedin,
            Instagram => &self.instagram,
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        use FormField::*;
        let slot = match field {
            Name => &mut self.name,
            Description => &mut self.description,
            CollegeType => &mut self.college_type,
            EstablishedYear => &mut self.established_year,
            LogoUrl => &mut self.logo_url,
            Email => &mut self.email,
            Phone => &mut self.phone,
            Website => &mut self.website,
            Address => &mut self.address,
            City => &mut self.city,
            State => &mut self.state,
            Country => &mut self.country,
            Courses => &mut self.courses,
            Accreditation => &mut self.accreditation,
            Ranking => &mut self.ranking,
            Facilities => &mut self.facilities,
            Facebook => &mut self.facebook,
            Twitter => &mut self.twitter,
            Linkedin => &mut self.linkedin,
            Instagram => &mut self.instagram,
        };
        *slot = value;
    }

    /// Error message for one field, or `None` when it is valid.
    pub fn validate_field(&self, field: FormField) -> Option<String> {
        let value = self.get(field).trim();
        if value.is_empty() {
            return field
                .is_required()
                .then(|| format!("{} is required", required_label(field)));
        }

        use FormField::*;
        match field {
            Name if value.chars().count() < 2 => {
                Some("Name must be at least 2 characters".to_string())
            }
            EstablishedYear => {
                let max = Utc::now().year();
                match value.parse::<i32>() {
                    Ok(year) if (1000..=max).contains(&year) => None,
                    _ => Some(format!("Enter a year between 1000 and {max}")),
                }
            }
            Email if !is_valid_email(value) => Some("Enter a valid email address".to_string()),
            Phone if !is_valid_phone(value) => Some("Enter a valid phone number".to_string()),
            Ranking => match value.parse::<u32>() {
                Ok(r) if r > 0 => None,
                _ => Some("Ranking must be a positive number".to_string()),
            },
            LogoUrl | Website | Facebook | Twitter | Linkedin | Instagram
                if !is_http_url(value) =>
            {
                Some("Enter a URL starting with http:// or https://".to_string())
            }
            _ => None,
        }
    }

    pub fn errors(&self) -> FieldErrors {
        FormField::ALL
            .into_iter()
            .filter_map(|f| self.validate_field(f).map(|e| (f, e)))
            .collect()
    }

    /// Completion of every tab, recomputed from the current values.
    pub fn completion(&self) -> TabCompletion {
        let clean = |tab: FormTab| FormField::on_tab(tab).all(|f| self.validate_field(f).is_none());
        TabCompletion {
            basic: clean(FormTab::Basic),
            contact: clean(FormTab::Contact),
            academic: true,
            social: true,
        }
    }

    /// First tab, in tab order, holding an error.
    pub fn first_invalid_tab(errors: &FieldErrors) -> Option<FormTab> {
        FormTab::ALL
            .into_iter()
            .find(|tab| errors.keys().any(|f| f.tab() == *tab))
    }

    /// Validate every field and build the request body.
    pub fn to_input(&self) -> Result<CollegeInput, ApiError> {
        let errors = self.errors();
        if !errors.is_empty() {
            return Err(ApiError::validation(
                errors
                    .iter()
                    .map(|(f, msg)| FieldError::new(f.key(), msg))
                    .collect(),
            ));
        }

        let opt = |v: &str| {
            let v = v.trim();
            (!v.is_empty()).then(|| v.to_string())
        };
        Ok(CollegeInput {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            college_type: opt(&self.college_type),
            established_year: self.established_year.trim().parse().ok(),
            logo_url: opt(&self.logo_url),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            website: opt(&self.website),
            address: self.address.trim().to_string(),
            city: opt(&self.city),
            state: opt(&self.state),
            country: opt(&self.country),
            courses: split_list(&self.courses),
            accreditation: opt(&self.accreditation),
            ranking: self.ranking.trim().parse().ok(),
            facilities: split_list(&self.facilities),
            facebook: opt(&self.facebook),
            twitter: opt(&self.twitter),
            linkedin: opt(&self.linkedin),
            instagram: opt(&self.instagram),
            is_active: self.is_active,
        })
    }
}

/// Map field errors returned by the API onto form fields.
pub fn server_field_errors(error: &ApiError) -> FieldErrors {
    error
        .field_errors()
        .iter()
        .filter_map(|e| FormField::from_key(&e.field).map(|f| (f, e.message.clone())))
        .collect()
}

fn required_label(field: FormField) -> &'static str {
    match field {
        FormField::Name => "Name",
        other => other.label(),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split([',', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic(name: &str, description: &str) -> CollegeFormValues {
        CollegeFormValues {
            name: name.into(),
            description: description.into(),
            ..CollegeFormValues::new()
        }
    }

    #[test]
    fn test_basic_complete_with_name_and_description() {
        let values = basic("MIT", "desc");
        assert!(values.completion().basic);
    }

    #[test]
    fn test_blank_name_is_incomplete_with_error() {
        let values = basic("", "desc");
        assert!(!values.completion().basic);
        assert_eq!(
            values.validate_field(FormField::Name).as_deref(),
            Some("Name is required")
        );
    }

    #[test]
    fn test_optional_basic_field_must_be_valid_when_given() {
        let mut values = basic("MIT", "desc");
        values.established_year = "1861".into();
        assert!(values.completion().basic);
        values.established_year = "3000".into();
        assert!(!values.completion().basic);
        values.established_year = "soon".into();
        assert!(values.validate_field(FormField::EstablishedYear).is_some());
    }

    #[test]
    fn test_contact_completion() {
        let mut values = basic("MIT", "desc");
        assert!(!values.completion().contact);

        values.email = "info@mit.edu".into();
        values.phone = "+1 (617) 253-1000".into();
        values.address = "77 Massachusetts Ave".into();
        assert!(values.completion().contact);

        values.website = "mit.edu".into();
        assert!(!values.completion().contact);
        values.website = "https://mit.edu".into();
        assert!(values.completion().contact);
    }

    #[test]
    fn test_academic_and_social_always_complete() {
        let completion = CollegeFormValues::new().completion();
        assert!(completion.academic);
        assert!(completion.social);
        assert!(!completion.is_complete(FormTab::Basic));
    }

    #[test]
    fn test_first_invalid_tab_follows_tab_order() {
        let mut values = basic("MIT", "desc");
        values.email = "info@mit.edu".into();
        values.phone = "6172531000".into();
        values.address = "Cambridge".into();
        values.facebook = "not a url".into();
        let errors = values.errors();
        assert_eq!(
            CollegeFormValues::first_invalid_tab(&errors),
            Some(FormTab::Social)
        );

        values.name.clear();
        let errors = values.errors();
        assert_eq!(
            CollegeFormValues::first_invalid_tab(&errors),
            Some(FormTab::Basic)
        );
    }

    #[test]
    fn test_to_input_trims_and_splits() {
        let values = CollegeFormValues {
            name: " MIT ".into(),
            description: "desc".into(),
            email: "info@mit.edu".into(),
            phone: "6172531000".into(),
            address: "Cambridge".into(),
            courses: "Physics, Math,\nBiology, ".into(),
            ranking: "1".into(),
            ..CollegeFormValues::new()
        };
        let input = values.to_input().unwrap();
        assert_eq!(input.name, "MIT");
        assert_eq!(input.courses, vec!["Physics", "Math", "Biology"]);
        assert_eq!(input.ranking, Some(1));
        assert_eq!(input.website, None);
        assert!(input.is_active);
    }

    #[test]
    fn test_to_input_reports_every_error() {
        let err = CollegeFormValues::new().to_input().unwrap_err();
        assert_eq!(err.field_error("name"), Some("Name is required"));
        assert_eq!(err.field_error("email"), Some("Email is required"));
    }

    #[test]
    fn test_round_trip_from_college() {
        let college = College {
            id: "c1".into(),
            name: "MIT".into(),
            courses: vec!["Physics".into(), "Math".into()],
            established_year: Some(1861),
            ..College::default()
        };
        let values = CollegeFormValues::from_college(&college);
        assert_eq!(values.courses, "Physics, Math");
        assert_eq!(values.established_year, "1861");
        assert_eq!(values.get(FormField::Name), "MIT");
    }

    #[test]
    fn test_server_errors_map_to_fields() {
        let err = ApiError::from_response(
            400,
            None,
            r#"{"message":"Validation failed","errors":{"name":"already exists","bogus":"x"}}"#,
        );
        let errors = server_field_errors(&err);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(&FormField::Name).map(String::as_str), Some("already exists"));
    }

    #[test]
    fn test_link_fields_need_http_url() {
        let mut values = basic("MIT", "desc");
        values.set(FormField::Website, "ftp://mit.edu".into());
        values.set(FormField::Facebook, "https://facebook.com/mit".into());
        assert_eq!(
            values.validate_field(FormField::Website).as_deref(),
            Some("Enter a URL starting with http:// or https://")
        );
        assert_eq!(values.validate_field(FormField::Facebook), None);
    }
}
