use std::path::Path;

use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tokio::runtime::{Builder, Runtime};

use crate::config::Config;
use crate::enrich::list_synthesis_files;
use crate::error::{Result, SinteseError};
use crate::keys::object_key;

/// Destination for enriched files. Calls block until the object is stored.
pub trait ObjectSink {
    fn put_file(&self, bucket: &str, key: &str, local: &Path) -> Result<()>;
}

impl<S: ObjectSink + ?Sized> ObjectSink for &S {
    fn put_file(&self, bucket: &str, key: &str, local: &Path) -> Result<()> {
        (**self).put_file(bucket, key, local)
    }
}

/// S3 sink driven by a private current-thread runtime, one `PutObject` at a time.
pub struct S3Sink {
    runtime: Runtime,
    client: Client,
}

impl S3Sink {
    /// Build a client from the default AWS provider chain plus the optional
    /// region and endpoint overrides in `config`.
    pub fn connect(config: &Config) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;

        let client = runtime.block_on(async {
            let mut loader = aws_config::defaults(BehaviorVersion::latest());
            if let Some(region) = &config.region {
                loader = loader.region(Region::new(region.clone()));
            }
            let shared = loader.load().await;

            let mut s3 = aws_sdk_s3::config::Builder::from(&shared);
            if let Some(endpoint) = &config.endpoint_url {
                s3 = s3.endpoint_url(endpoint).force_path_style(true);
            }
            Client::from_conf(s3.build())
        });

        Ok(Self { runtime, client })
    }
}

impl ObjectSink for S3Sink {
    fn put_file(&self, bucket: &str, key: &str, local: &Path) -> Result<()> {
        self.runtime.block_on(async {
            let body = ByteStream::from_path(local)
                .await
                .map_err(|e| SinteseError::General(e.to_string()))?;
            self.client
                .put_object()
                .bucket(bucket)
                .key(key)
                .body(body)
                .send()
                .await
                .map_err(|e| SinteseError::General(DisplayErrorContext(e).to_string()))?;
            Ok(())
        })
    }
}

/// Upload every synthesis file in `dir` under `<prefix>/<segment>/`.
///
/// Stops at the first failure; objects stored before it are left in place.
/// Returns the keys written, in listing order.
pub fn upload_all<S: ObjectSink>(
    sink: &S,
    dir: &Path,
    bucket: &str,
    prefix: &str,
    segment: &str,
) -> Result<Vec<String>> {
    tracing::info!("Starting upload of synthesis files to s3://{bucket}");

    let mut keys = Vec::new();
    for name in list_synthesis_files(dir)? {
        let key = object_key(prefix, segment, &name);
        sink.put_file(bucket, &key, &dir.join(&name))
            .map_err(|e| SinteseError::Upload {
                file: name.clone(),
                message: e.to_string(),
            })?;
        tracing::info!(file = %name, key = %key, "uploaded");
        keys.push(key);
    }
    Ok(keys)
}
