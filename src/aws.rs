// Shared AWS SDK configuration

use aws_config::{BehaviorVersion, Region, SdkConfig};
use galleri_config::AwsConfig;

/// SDK config for every client a command builds.
///
/// Region and endpoint fall back to the SDK's own provider chain when unset.
pub async fn sdk_config(aws: &AwsConfig) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = &aws.region {
        loader = loader.region(Region::new(region.clone()));
    }
    if let Some(endpoint) = &aws.endpoint {
        tracing::info!(endpoint = %endpoint, "Using custom AWS endpoint");
        loader = loader.endpoint_url(endpoint);
    }
    loader.load().await
}
