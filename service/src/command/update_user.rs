//! [`Command`] for updating a [`User`].

use common::operations::{By, Commit, Select, Transact, Transacted, Update};
use derive_more::{Display, Error, From};
use secrecy::{ExposeSecret, SecretBox};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::person::{Email, FirstName, LastName};
#[cfg(doc)]
use crate::domain::user::Password;
use crate::{
    domain::{person, user, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating a [`User`].
///
/// Fields left as [`None`] are untouched.
#[derive(Clone, Debug)]
pub struct UpdateUser {
    /// ID of the [`User`] to update.
    pub user_id: user::Id,

    /// New [`FirstName`], if supplied.
    pub first_name: Option<person::FirstName>,

    /// New [`LastName`], if supplied.
    pub last_name: Option<person::LastName>,

    /// New [`Email`], if supplied.
    pub email: Option<person::Email>,

    /// New [`Password`], if supplied.
    pub password: Option<SecretBox<user::Password>>,

    /// New activity indicator, if supplied.
    pub is_active: Option<bool>,

    /// New administrative privileges indicator, if supplied.
    pub is_superuser: Option<bool>,
}

impl<Db> Command<UpdateUser> for Service<Db>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + for<'e> Database<
            Select<By<Option<User>, &'e person::Email>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Update<User>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = User;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateUser {
            user_id,
            first_name,
            last_name,
            email,
            password,
            is_active,
            is_superuser,
        } = cmd;

        let mut user = self
            .database()
            .execute(Select(By::<Option<User>, _>::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::UserNotExists(user_id))
            .map_err(tracerr::wrap!())?;

        if let Some(email) = &email {
            if *email != user.email {
                let occupant = self
                    .database()
                    .execute(Select(By::new(email)))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?;
                if occupant.is_some_and(|u| u.id != user_id) {
                    return Err(tracerr::new!(E::EmailOccupied(
                        email.clone(),
                    )));
                }
            }
        }

        if let Some(first_name) = first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = last_name {
            user.last_name = last_name;
        }
        if let Some(email) = email {
            user.email = email;
        }
        if let Some(password) = password {
            user.password_hash =
                user::PasswordHash::new(password.expose_secret());
        }
        if let Some(is_active) = is_active {
            user.is_active = is_active;
        }
        if let Some(is_superuser) = is_superuser {
            user.is_superuser = is_superuser;
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Update(user.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(user)
    }
}

/// Error of [`UpdateUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`User`] with the provided ID does not exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),

    /// [`person::Email`] is already taken by another [`User`].
    #[display("`{_0}` email is occupied")]
    #[from(ignore)]
    EmailOccupied(#[error(not(source))] person::Email),
}
