//! User repository built on the generic [`Repository`] contract.

use sea_orm::sea_query::SimpleExpr;
use sea_orm::ActiveValue::{NotSet, Set};
use uuid::Uuid;

use crate::base::Repository;
use crate::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::query::{binary_cond, name_query_cond};
use crate::session::Session;
use common::RepoResult;
use domain::{FilterParams, UserChanges, UserIn, EMAIL_PARAM};

/// Repository for the `users` table.
///
/// Filter parameters:
/// - `query`: case-insensitive substring of the name
/// - `email`: exact email, or `!email` to exclude it
#[derive(Debug, Clone, Copy, Default)]
pub struct UserRepository;

impl UserRepository {
    /// Find a user by email address
    pub async fn find_by_email(
        &self,
        session: &mut Session,
        email: &str,
    ) -> RepoResult<Option<user::Model>> {
        self.read(session, email, Some(user::Column::Email), Vec::new())
            .await
    }
}

impl Repository for UserRepository {
    type Entity = UserEntity;
    type Model = user::Model;
    type ActiveModel = ActiveModel;
    type Input = UserIn;
    type Changes = UserChanges;

    fn id_column() -> user::Column {
        user::Column::Id
    }

    fn from_input(input: UserIn) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            name: Set(input.name),
            uuid: Set(Uuid::new_v4()),
            email: Set(input.email),
            password: Set(input.password),
            superuser: Set(false),
            deleted: Set(false),
        }
    }

    fn apply_changes(model: &mut ActiveModel, changes: UserChanges) {
        let UserChanges {
            name,
            email,
            password,
            uuid,
            superuser,
            deleted,
        } = changes;

        if let Some(name) = name {
            model.name = Set(name);
        }
        if let Some(email) = email {
            model.email = Set(email);
        }
        if let Some(password) = password {
            model.password = Set(password);
        }
        if let Some(uuid) = uuid {
            model.uuid = Set(uuid);
        }
        if let Some(superuser) = superuser {
            model.superuser = Set(superuser);
        }
        if let Some(deleted) = deleted {
            model.deleted = Set(deleted);
        }
    }

    fn cond_list(params: &FilterParams) -> RepoResult<Vec<SimpleExpr>> {
        let mut conditions = Vec::new();

        conditions.extend(name_query_cond::<UserEntity>(user::Column::Name, params));
        if let Some(email) = params.get(EMAIL_PARAM) {
            conditions.push(binary_cond(user::Column::Email, email));
        }

        Ok(conditions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveValue;

    #[test]
    fn test_from_input_copies_fields_and_leaves_id_unset() {
        let active = UserRepository::from_input(UserIn::new("szl", "szl@szl.com", "pass"));

        assert!(matches!(active.id, ActiveValue::NotSet));
        assert!(matches!(&active.name, ActiveValue::Set(name) if name == "szl"));
        assert!(matches!(&active.email, ActiveValue::Set(email) if email == "szl@szl.com"));
        assert!(matches!(active.superuser, ActiveValue::Set(false)));
    }

    #[test]
    fn test_apply_changes_skips_none_fields() {
        let mut active = UserRepository::from_input(UserIn::new("szl", "szl@szl.com", "pass"));

        UserRepository::apply_changes(
            &mut active,
            UserChanges {
                name: Some("renamed".to_string()),
                superuser: Some(true),
                ..UserChanges::default()
            },
        );

        assert!(matches!(&active.name, ActiveValue::Set(name) if name == "renamed"));
        assert!(matches!(&active.email, ActiveValue::Set(email) if email == "szl@szl.com"));
        assert!(matches!(active.superuser, ActiveValue::Set(true)));
    }

    #[test]
    fn test_cond_list_empty_without_known_params() {
        let params: FilterParams = [("unknown".to_string(), "x".to_string())].into();
        assert!(UserRepository::cond_list(&params).unwrap().is_empty());
    }

    #[test]
    fn test_cond_list_combines_query_and_email() {
        let params: FilterParams = [
            ("query".to_string(), "szl".to_string()),
            ("email".to_string(), "!a@b.com".to_string()),
        ]
        .into();

        assert_eq!(UserRepository::cond_list(&params).unwrap().len(), 2);
    }
}
