use crate::domain::client::ClientProjection;
use crate::forms::clients::{AddClientForm, EditClientForm};
use crate::repository::errors::RepositoryError;
use crate::repository::{ClientReader, ClientWriter, ProjectionReader};
use crate::services::{ServiceError, ServiceResult, conflict_or_missing};

/// Lists every client with its campaign and product counts.
pub fn list_clients<R>(repo: &R) -> ServiceResult<Vec<ClientProjection>>
where
    R: ProjectionReader + ?Sized,
{
    repo.list_client_projections().map_err(ServiceError::from)
}

pub fn get_client<R>(repo: &R, client_id: i32) -> ServiceResult<ClientProjection>
where
    R: ProjectionReader + ?Sized,
{
    repo.get_client_projection(client_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Creates a client and returns its projection.
pub fn create_client<R>(repo: &R, form: AddClientForm) -> ServiceResult<ClientProjection>
where
    R: ClientWriter + ProjectionReader + ?Sized,
{
    let new_client = form
        .into_new_client()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    let created = repo
        .create_client(&new_client)
        .map_err(ServiceError::from)?;
    log::info!("Created client {} ({})", created.id, created.name);

    get_client(repo, created.id)
}

/// Applies the present fields of `form` to the client.
///
/// A form without any field is a no-op. When another writer bumps the row first
/// the result is `ConcurrencyConflict`, or `NotFound` if the row is gone.
pub fn update_client<R>(repo: &R, client_id: i32, form: EditClientForm) -> ServiceResult<()>
where
    R: ClientReader + ClientWriter + ?Sized,
{
    let expected_version = form.version;
    let updates = form
        .into_update_client()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    let current = repo
        .get_client_by_id(client_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    if updates.is_empty() {
        return Ok(());
    }

    let version = expected_version.unwrap_or(current.version);
    match repo.update_client(client_id, version, &updates) {
        Ok(client) => {
            log::info!("Updated client {} to version {}", client.id, client.version);
            Ok(())
        }
        Err(RepositoryError::ConcurrencyConflict) => {
            let still_exists = repo
                .get_client_by_id(client_id)
                .map_err(ServiceError::from)?
                .is_some();
            Err(conflict_or_missing("client", client_id, still_exists))
        }
        Err(err) => Err(ServiceError::from(err)),
    }
}

/// Deletes the client together with everything it owns.
pub fn delete_client<R>(repo: &R, client_id: i32) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
{
    repo.delete_client(client_id).map_err(ServiceError::from)?;
    log::info!("Deleted client {client_id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;
    use crate::domain::client::{Client, NewClient, UpdateClient};
    use crate::repository::errors::RepositoryResult;
    use crate::repository::mock::{MockClientReader, MockClientWriter, MockProjectionReader};

    fn datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default()
    }

    fn sample_client(id: i32, version: i32) -> Client {
        Client {
            id,
            name: "Nike".to_string(),
            description: None,
            version,
            created_at: datetime(),
            updated_at: None,
        }
    }

    #[test]
    fn create_client_returns_projection() {
        let mut repo = FakeRepo::new();
        repo.client_writer
            .expect_create_client()
            .times(1)
            .withf(|new_client| new_client.name == "Nike")
            .returning(|_| Ok(sample_client(4, 0)));
        repo.projection_reader
            .expect_get_client_projection()
            .times(1)
            .withf(|id| *id == 4)
            .returning(|_| Ok(Some(ClientProjection::new(sample_client(4, 0), 0, 0))));

        let form = AddClientForm {
            name: "  Nike ".to_string(),
            description: None,
        };

        let projection = create_client(&repo, form).expect("expected success");

        assert_eq!(projection.id, 4);
        assert_eq!(projection.campaign_count, 0);
    }

    #[test]
    fn create_client_rejects_blank_name_without_writing() {
        let mut repo = FakeRepo::new();
        repo.client_writer.expect_create_client().never();

        let form = AddClientForm {
            name: "   ".to_string(),
            description: None,
        };

        assert!(matches!(
            create_client(&repo, form),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn update_client_missing_row_is_not_found() {
        let mut repo = FakeRepo::new();
        repo.client_reader
            .expect_get_client_by_id()
            .times(1)
            .returning(|_| Ok(None));
        repo.client_writer.expect_update_client().never();

        let form = EditClientForm {
            name: Some("Renamed".to_string()),
            ..EditClientForm::default()
        };

        assert!(matches!(
            update_client(&repo, 3, form),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn update_client_without_fields_skips_write() {
        let mut repo = FakeRepo::new();
        repo.client_reader
            .expect_get_client_by_id()
            .times(1)
            .returning(|id| Ok(Some(sample_client(id, 2))));
        repo.client_writer.expect_update_client().never();

        let result = update_client(&repo, 3, EditClientForm::default());

        assert!(result.is_ok());
    }

    #[test]
    fn update_client_uses_read_version_when_none_supplied() {
        let mut repo = FakeRepo::new();
        repo.client_reader
            .expect_get_client_by_id()
            .times(1)
            .returning(|id| Ok(Some(sample_client(id, 5))));
        repo.client_writer
            .expect_update_client()
            .times(1)
            .withf(|id, version, updates| {
                *id == 3 && *version == 5 && updates.name.as_deref() == Some("Renamed")
            })
            .returning(|id, _, _| Ok(sample_client(id, 6)));

        let form = EditClientForm {
            name: Some("Renamed".to_string()),
            ..EditClientForm::default()
        };

        assert!(update_client(&repo, 3, form).is_ok());
    }

    #[test]
    fn update_client_conflict_on_deleted_row_is_not_found() {
        let mut repo = FakeRepo::new();
        let mut reads = 0;
        repo.client_reader
            .expect_get_client_by_id()
            .times(2)
            .returning(move |id| {
                reads += 1;
                if reads == 1 {
                    Ok(Some(sample_client(id, 1)))
                } else {
                    Ok(None)
                }
            });
        repo.client_writer
            .expect_update_client()
            .times(1)
            .returning(|_, _, _| Err(RepositoryError::ConcurrencyConflict));

        let form = EditClientForm {
            name: Some("Renamed".to_string()),
            ..EditClientForm::default()
        };

        assert!(matches!(
            update_client(&repo, 3, form),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn update_client_conflict_on_live_row_is_surfaced() {
        let mut repo = FakeRepo::new();
        repo.client_reader
            .expect_get_client_by_id()
            .times(2)
            .returning(|id| Ok(Some(sample_client(id, 4))));
        repo.client_writer
            .expect_update_client()
            .times(1)
            .withf(|_, version, _| *version == 1)
            .returning(|_, _, _| Err(RepositoryError::ConcurrencyConflict));

        let form = EditClientForm {
            name: Some("Renamed".to_string()),
            version: Some(1),
            ..EditClientForm::default()
        };

        assert!(matches!(
            update_client(&repo, 3, form),
            Err(ServiceError::ConcurrencyConflict)
        ));
    }

    #[test]
    fn delete_client_maps_not_found() {
        let mut repo = FakeRepo::new();
        repo.client_writer
            .expect_delete_client()
            .times(1)
            .returning(|_| Err(RepositoryError::NotFound));

        assert!(matches!(
            delete_client(&repo, 99),
            Err(ServiceError::NotFound)
        ));
    }

    struct FakeRepo {
        client_reader: MockClientReader,
        client_writer: MockClientWriter,
        projection_reader: MockProjectionReader,
    }

    impl FakeRepo {
        fn new() -> Self {
            Self {
                client_reader: MockClientReader::new(),
                client_writer: MockClientWriter::new(),
                projection_reader: MockProjectionReader::new(),
            }
        }
    }

    impl ClientReader for FakeRepo {
        fn get_client_by_id(&self, id: i32) -> RepositoryResult<Option<Client>> {
            self.client_reader.get_client_by_id(id)
        }

        fn list_clients(&self) -> RepositoryResult<Vec<Client>> {
            self.client_reader.list_clients()
        }

        fn count_clients(&self) -> RepositoryResult<usize> {
            self.client_reader.count_clients()
        }
    }

    impl ClientWriter for FakeRepo {
        fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client> {
            self.client_writer.create_client(new_client)
        }

        fn update_client(
            &self,
            client_id: i32,
            expected_version: i32,
            updates: &UpdateClient,
        ) -> RepositoryResult<Client> {
            self.client_writer
                .update_client(client_id, expected_version, updates)
        }

        fn delete_client(&self, client_id: i32) -> RepositoryResult<()> {
            self.client_writer.delete_client(client_id)
        }
    }

    impl ProjectionReader for FakeRepo {
        fn get_client_projection(&self, id: i32) -> RepositoryResult<Option<ClientProjection>> {
            self.projection_reader.get_client_projection(id)
        }

        fn list_client_projections(&self) -> RepositoryResult<Vec<ClientProjection>> {
            self.projection_reader.list_client_projections()
        }

        fn get_campaign_projection(
            &self,
            id: i32,
        ) -> RepositoryResult<Option<crate::domain::campaign::CampaignProjection>> {
            self.projection_reader.get_campaign_projection(id)
        }

        fn list_campaign_projections(
            &self,
            query: crate::domain::campaign::CampaignListQuery,
        ) -> RepositoryResult<Vec<crate::domain::campaign::CampaignProjection>> {
            self.projection_reader.list_campaign_projections(query)
        }

        fn get_product_projection(
            &self,
            id: i32,
        ) -> RepositoryResult<Option<crate::domain::product::ProductProjection>> {
            self.projection_reader.get_product_projection(id)
        }

        fn list_product_projections(
            &self,
            query: crate::domain::product::ProductListQuery,
        ) -> RepositoryResult<Vec<crate::domain::product::ProductProjection>> {
            self.projection_reader.list_product_projections(query)
        }
    }
}
