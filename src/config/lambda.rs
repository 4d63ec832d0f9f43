use crate::domain::upload::{UploadPolicy, DEFAULT_UPLOAD_PREFIX};
use crate::utils::error::{AppError, Result};
use crate::utils::validation::{
    validate_aws_region, validate_key_prefix, validate_non_empty_string, validate_required_field,
    validate_s3_bucket_name, validate_url, Validate,
};
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_dynamodb::config::Credentials;
use std::env;

pub const SAM_LOCAL_DYNAMODB_ENDPOINT: &str = "http://host.docker.internal:8000";
pub const SAM_LOCAL_S3_ENDPOINT: &str = "http://host.docker.internal:4566";
const SAM_LOCAL_REGION: &str = "us-east-1";

#[derive(Debug, Clone, PartialEq)]
pub struct LambdaConfig {
    pub documents_table: String,
    pub employees_table: String,
    pub roles_table: String,
    pub s3_bucket: String,
    pub region: String,
    pub upload_prefix: String,
    /// Running under `sam local`: talk to DynamoDB Local and LocalStack.
    pub sam_local: bool,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());
        let s3_bucket = lookup("S3_BUCKET");

        Ok(Self {
            documents_table: var("DOCUMENTS_TABLE", "Documents"),
            employees_table: var("EMPLOYEES_TABLE", "Employees"),
            roles_table: var("ROLES_TABLE", "Roles"),
            s3_bucket: validate_required_field("S3_BUCKET", &s3_bucket)?.clone(),
            region: var("AWS_REGION", SAM_LOCAL_REGION),
            upload_prefix: var("UPLOAD_PREFIX", DEFAULT_UPLOAD_PREFIX),
            sam_local: lookup("AWS_SAM_LOCAL").as_deref() == Some("true"),
        })
    }

    pub fn upload_policy(&self) -> UploadPolicy {
        UploadPolicy {
            prefix: self.upload_prefix.clone(),
            ..Default::default()
        }
    }

    pub fn dynamodb_endpoint(&self) -> Option<&'static str> {
        self.sam_local.then_some(SAM_LOCAL_DYNAMODB_ENDPOINT)
    }

    pub fn s3_endpoint(&self) -> Option<&'static str> {
        self.sam_local.then_some(SAM_LOCAL_S3_ENDPOINT)
    }

    async fn sdk_config(&self) -> SdkConfig {
        let loader = aws_config::defaults(BehaviorVersion::latest());
        if self.sam_local {
            loader
                .region(Region::new(SAM_LOCAL_REGION))
                .credentials_provider(Credentials::new(
                    "test",
                    "test",
                    Some("test".to_string()),
                    None,
                    "sam-local",
                ))
                .load()
                .await
        } else {
            loader.region(Region::new(self.region.clone())).load().await
        }
    }

    pub async fn dynamodb_client(&self) -> aws_sdk_dynamodb::Client {
        let sdk = self.sdk_config().await;
        let mut builder = aws_sdk_dynamodb::config::Builder::from(&sdk);
        if let Some(endpoint) = self.dynamodb_endpoint() {
            builder = builder.endpoint_url(endpoint);
        }
        aws_sdk_dynamodb::Client::from_conf(builder.build())
    }

    pub async fn s3_client(&self) -> aws_sdk_s3::Client {
        let sdk = self.sdk_config().await;
        let mut builder = aws_sdk_s3::config::Builder::from(&sdk);
        if let Some(endpoint) = self.s3_endpoint() {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }
        aws_sdk_s3::Client::from_conf(builder.build())
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("DOCUMENTS_TABLE", &self.documents_table)?;
        validate_non_empty_string("EMPLOYEES_TABLE", &self.employees_table)?;
        validate_non_empty_string("ROLES_TABLE", &self.roles_table)?;
        validate_s3_bucket_name("S3_BUCKET", &self.s3_bucket)?;
        validate_aws_region("AWS_REGION", &self.region)?;
        validate_key_prefix("UPLOAD_PREFIX", &self.upload_prefix)?;

        for endpoint in [self.dynamodb_endpoint(), self.s3_endpoint()].into_iter().flatten() {
            validate_url("endpoint", endpoint)?;
        }

        if self.documents_table == self.employees_table || self.documents_table == self.roles_table
        {
            return Err(AppError::InvalidConfigValue {
                field: "DOCUMENTS_TABLE".to_string(),
                value: self.documents_table.clone(),
                reason: "each entity needs its own table".to_string(),
            });
        }

        tracing::info!("Lambda configuration validation passed");
        Ok(())
    }
}
