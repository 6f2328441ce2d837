// File: src/defaults.rs
// Purpose: Rules and struct-level checks shared by every tenant

use crate::directive::Directive;
use crate::record::application::{
    ADDRESS, APPLICANT, APPLICANTS, APPLICANT_EMAIL, APPLICANT_PHONE, APPLICATION, CITY,
    COUNTRY_CODE, POSTAL_CODE, SOCIAL_INSURANCE_NUMBER, STREET,
};
use crate::record::user::{
    ACCOUNT, ACCOUNT_ID, ACCOUNT_SCHEMA, ADDRESSES, AGE, EMAIL, FIRST_NAME, POSTAL_ADDRESS, USER,
    ZIP_CODE,
};
use crate::record::{Application, User};
use crate::report::Checker;
use crate::rules::{EntityRules, RuleSet};
use crate::schema::Entity;

/// Country whose applicants must provide a social insurance number
const SIN_COUNTRY: &str = "CA";

/// Rule maps applied to every tenant before its own overlay.
pub fn default_rules() -> EntityRules {
    let mut rules = EntityRules::new();

    rules.insert(
        USER.name.to_string(),
        RuleSet::new()
            .with(FIRST_NAME.name, "max=10")
            .with(AGE.name, "min=18")
            .with(EMAIL.name, "required,email")
            .with(ACCOUNT.name, "required"),
    );
    rules.insert(
        POSTAL_ADDRESS.name.to_string(),
        RuleSet::new().with(ZIP_CODE.name, "required"),
    );
    rules.insert(
        ACCOUNT_SCHEMA.name.to_string(),
        RuleSet::new().with(ACCOUNT_ID.name, "required"),
    );

    rules.insert(
        APPLICATION.name.to_string(),
        RuleSet::new().with(APPLICANTS.name, "omitempty,dive,required"),
    );
    rules.insert(
        APPLICANT.name.to_string(),
        RuleSet::new()
            .with(APPLICANT_EMAIL.name, "required,max=20")
            .with(APPLICANT_PHONE.name, "required,phone"),
    );
    rules.insert(
        ADDRESS.name.to_string(),
        RuleSet::new()
            .with(STREET.name, "omitempty,min=10")
            .with(CITY.name, "omitempty,oneof=Toronto Calgary")
            .with(COUNTRY_CODE.name, "country_code")
            .with(POSTAL_CODE.name, "required,canadian_postal_code"),
    );

    rules
}

/// Walks a user: its own fields, then every address, then the account.
pub fn user_validation(user: &User, checker: &mut Checker<'_>) {
    checker.apply(user);

    for (i, address) in user.addresses.iter().enumerate() {
        checker.nested(format!("{}[{}]", ADDRESSES.name, i), |c| c.apply(address));
    }

    if let Some(account) = &user.account {
        checker.nested(ACCOUNT.name, |c| c.apply(account));
    }
}

/// Walks an application: the applicant map, then each present applicant
/// and its address.
///
/// The social insurance number is only required for Canadian addresses.
pub fn application_validation(application: &Application, checker: &mut Checker<'_>) {
    checker.apply(application);

    for (key, applicant) in &application.applicants {
        let Some(applicant) = applicant else {
            continue;
        };

        checker.nested(format!("{}[{}]", APPLICANTS.name, key), |c| {
            if applicant.address.country_code == SIN_COUNTRY {
                let sin = applicant.value(SOCIAL_INSURANCE_NUMBER.name);
                c.check(&SOCIAL_INSURANCE_NUMBER, &sin, &[Directive::Required]);
            }
            c.apply(applicant);
            c.nested(ADDRESS.name, |c| c.apply(&applicant.address));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Account, Applicant, PostalAddress, Sin};
    use crate::registry::Validators;
    use crate::rules::RuleBook;
    use pretty_assertions::assert_eq;

    fn paths<F: FnOnce(&mut Checker<'_>)>(root: &str, f: F) -> Vec<String> {
        let validators = Validators::default();
        let book = RuleBook::compile(&default_rules(), &validators).unwrap();
        let mut checker = Checker::new(&validators, &book, root);
        f(&mut checker);
        checker.into_violations().into_iter().map(|v| v.path).collect()
    }

    #[test]
    fn test_default_rules_compile() {
        let rules = default_rules();
        assert!(RuleBook::compile(&rules, &Validators::default()).is_ok());
        assert_eq!(rules["User"].get("Age"), Some("min=18"));
        assert_eq!(rules["Address"].get("PostalCode"), Some("required,canadian_postal_code"));
    }

    #[test]
    fn test_user_walk_reports_nested_paths() {
        let user = User {
            first_name: "Maximilian-Alexander".into(),
            age: 17,
            email: "not-an-email".into(),
            addresses: vec![
                PostalAddress {
                    zip_code: "H2X 1Y4".into(),
                    province: "QC".into(),
                },
                PostalAddress::default(),
            ],
            account: Some(Account::default()),
            ..User::default()
        };

        assert_eq!(
            paths("User", |c| user_validation(&user, c)),
            vec![
                "User.FirstName",
                "User.Age",
                "User.Email",
                "User.Addresses[1].ZipCode",
                "User.Account.ID",
            ]
        );
    }

    #[test]
    fn test_missing_account_is_required_not_walked() {
        let user = User {
            age: 30,
            email: "jdoe@mail.com".into(),
            ..User::default()
        };
        assert_eq!(paths("User", |c| user_validation(&user, c)), vec!["User.Account"]);
    }

    #[test]
    fn test_sin_required_only_in_canada() {
        let applicant = |country: &str| Applicant {
            social_insurance_number: None,
            email: Some("myemail@email.com".into()),
            phone: "403-111-5555".into(),
            address: crate::record::Address {
                street: String::new(),
                city: String::new(),
                country_code: country.into(),
                postal_code: "T2Y5G1".into(),
            },
        };

        let mut application = Application::default();
        application.applicants.insert(7, Some(applicant("CA")));
        assert_eq!(
            paths("Application", |c| application_validation(&application, c)),
            vec!["Application.Applicants[7].SocialInsuranceNumber"]
        );

        application.applicants.insert(7, Some(applicant("US")));
        assert!(paths("Application", |c| application_validation(&application, c)).is_empty());

        let mut with_sin = applicant("CA");
        with_sin.social_insurance_number = Some(Sin("666-666-666".into()));
        application.applicants.insert(7, Some(with_sin));
        assert!(paths("Application", |c| application_validation(&application, c)).is_empty());
    }
}
