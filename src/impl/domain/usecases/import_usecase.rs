use std::path::Path;

use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::{
    data::models::backup_model::ImportModel,
    entities::ImportData,
    errors::ReadError,
};

#[async_trait]
pub trait ImportUsecase: Send + Sync {
    fn from_string(&self, json: &str) -> Result<ImportData, ServerError>;

    async fn from_file<P>(&self, path: P) -> Result<ImportData, ServerError>
    where
        P: AsRef<Path> + Send;
}

pub(crate) struct ImportUsecaseImpl;

#[async_trait]
impl ImportUsecase for ImportUsecaseImpl {
    fn from_string(&self, json: &str) -> Result<ImportData, ServerError> {
        json.parse::<ImportModel>()?.try_into()
    }

    async fn from_file<P>(&self, path: P) -> Result<ImportData, ServerError>
    where
        P: AsRef<Path> + Send,
    {
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ReadError::with_debug(&e))?;
        self.from_string(&json)
    }
}

impl ImportUsecaseImpl {
    pub(crate) fn new() -> Self {
        ImportUsecaseImpl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_import_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backup.json");
        tokio::fs::write(
            &path,
            r#"{"goals":[{"id":"1","title":"Car","targetAmount":500,"currentAmount":20,"deadline":"2025-01-01"}]}"#,
        )
        .await
        .unwrap();
        let data = ImportUsecaseImpl::new().from_file(&path).await.unwrap();
        let goals = data.goals.unwrap();
        assert_eq!(goals[0].title, "Car");
        assert_eq!(goals[0].current_amount, 20.0);
        assert!(data.transactions.is_none());
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ImportUsecaseImpl::new()
            .from_file(dir.path().join("absent.json"))
            .await
            .is_err());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(ImportUsecaseImpl::new().from_string("{\"goals\": [").is_err());
    }
}
