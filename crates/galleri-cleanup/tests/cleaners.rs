// Cleanup runs against in-memory stand-ins for the AWS services.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use galleri_cleanup::api::{
    BackupApi, EksApi, IamApi, LogsApi, ObjectId, Policy, PolicyAttachments, PolicyVersion, S3Api,
};
use galleri_cleanup::eks::EksCleaner;
use galleri_cleanup::iam::IamPolicyCleaner;
use galleri_cleanup::logs::LogGroupCleaner;
use galleri_cleanup::s3::BucketCleaner;
use galleri_cleanup::vaults::VaultCleaner;
use galleri_cleanup::{execute, plan, CleanupError, Result, WaitPolicy};
use parking_lot::Mutex;

fn quick_wait(max_attempts: u32) -> WaitPolicy {
    WaitPolicy::new(Duration::from_millis(1), max_attempts)
}

type CallLog = Arc<Mutex<Vec<String>>>;

fn record(calls: &CallLog, call: String) {
    calls.lock().push(call);
}

// ---------------------------------------------------------------- backup

#[derive(Default)]
struct VaultState {
    vaults: BTreeMap<String, Vec<String>>,
    /// Listings still reporting a point after it was deleted.
    lagging_listings: u32,
}

#[derive(Clone, Default)]
struct FakeBackup {
    state: Arc<Mutex<VaultState>>,
    calls: CallLog,
}

impl FakeBackup {
    fn with_vaults(vaults: &[(&str, &[&str])]) -> Self {
        let fake = Self::default();
        {
            let mut state = fake.state.lock();
            for (vault, points) in vaults {
                state.vaults.insert(
                    vault.to_string(),
                    points.iter().map(|p| p.to_string()).collect(),
                );
            }
        }
        fake
    }
}

#[async_trait]
impl BackupApi for FakeBackup {
    async fn list_vaults(&self) -> Result<Vec<String>> {
        Ok(self.state.lock().vaults.keys().cloned().collect())
    }

    async fn list_recovery_points(&self, vault: &str) -> Result<Vec<String>> {
        record(&self.calls, format!("list_points {}", vault));
        let mut state = self.state.lock();
        let points = state.vaults.get(vault).cloned().unwrap_or_default();
        if points.is_empty() && state.lagging_listings > 0 {
            state.lagging_listings -= 1;
            return Ok(vec!["arn:rp:deleting".to_string()]);
        }
        Ok(points)
    }

    async fn delete_recovery_point(&self, vault: &str, arn: &str) -> Result<()> {
        record(&self.calls, format!("delete_point {}", arn));
        if let Some(points) = self.state.lock().vaults.get_mut(vault) {
            points.retain(|p| p != arn);
        }
        Ok(())
    }

    async fn delete_vault(&self, vault: &str) -> Result<()> {
        record(&self.calls, format!("delete_vault {}", vault));
        let mut state = self.state.lock();
        if state.vaults.get(vault).is_some_and(|points| !points.is_empty()) {
            return Err(CleanupError::api(
                "DeleteBackupVault",
                vault,
                "InvalidRequestException: vault not empty",
            ));
        }
        state.vaults.remove(vault);
        Ok(())
    }
}

#[tokio::test]
async fn recovery_points_go_before_their_vault() {
    let api = FakeBackup::with_vaults(&[
        ("dev-9-daily", &["arn:rp:1", "arn:rp:2"]),
        ("dev-90-weekly", &[]),
        ("uat-daily", &["arn:rp:3"]),
    ]);
    let calls = api.calls.clone();
    let state = api.state.clone();
    let cleaner = VaultCleaner::new(api, quick_wait(3));

    let targets = plan(&cleaner, "dev-9").await.unwrap();
    assert_eq!(targets, vec!["dev-9-daily", "dev-90-weekly"]);

    let removed = execute(&cleaner, "dev-9", &targets).await.unwrap();
    assert_eq!(removed, targets);

    let calls = calls.lock().clone();
    let vault_deleted = calls
        .iter()
        .position(|c| c == "delete_vault dev-9-daily")
        .unwrap();
    for point in ["delete_point arn:rp:1", "delete_point arn:rp:2"] {
        assert!(calls.iter().position(|c| c == point).unwrap() < vault_deleted);
    }
    assert_eq!(
        state.lock().vaults.keys().cloned().collect::<Vec<_>>(),
        vec!["uat-daily"]
    );
}

#[tokio::test]
async fn vault_deletion_waits_for_points_to_drain() {
    let api = FakeBackup::with_vaults(&[("dev-9-daily", &["arn:rp:1"])]);
    api.state.lock().lagging_listings = 2;
    let calls = api.calls.clone();
    let cleaner = VaultCleaner::new(api, quick_wait(5));

    execute(&cleaner, "dev-9", &["dev-9-daily".to_string()])
        .await
        .unwrap();

    let listings = calls
        .lock()
        .iter()
        .filter(|c| c.starts_with("list_points"))
        .count();
    // initial listing, two lagging polls, one empty poll
    assert_eq!(listings, 4);
}

#[tokio::test]
async fn empty_pattern_is_refused() {
    let cleaner = VaultCleaner::new(FakeBackup::default(), quick_wait(1));
    assert!(matches!(
        plan(&cleaner, "  ").await,
        Err(CleanupError::EmptyPattern)
    ));
}

// ---------------------------------------------------------------- logs

#[derive(Clone, Default)]
struct FakeLogs {
    groups: Arc<Mutex<Vec<String>>>,
    deny: Option<String>,
}

impl FakeLogs {
    fn with_groups(groups: &[&str]) -> Self {
        Self {
            groups: Arc::new(Mutex::new(groups.iter().map(|g| g.to_string()).collect())),
            deny: None,
        }
    }
}

#[async_trait]
impl LogsApi for FakeLogs {
    async fn list_log_groups(&self) -> Result<Vec<String>> {
        Ok(self.groups.lock().clone())
    }

    async fn delete_log_group(&self, name: &str) -> Result<()> {
        if self.deny.as_deref() == Some(name) {
            return Err(CleanupError::api(
                "DeleteLogGroup",
                name,
                "AccessDeniedException",
            ));
        }
        self.groups.lock().retain(|g| g != name);
        Ok(())
    }
}

#[tokio::test]
async fn log_groups_match_anywhere_in_the_name() {
    let cleaner = LogGroupCleaner::new(FakeLogs::with_groups(&[
        "/aws/lambda/dev-9-getUserRole",
        "/aws/lambda/uat-getUserRole",
        "dev-9-eks-cluster",
    ]));

    let targets = plan(&cleaner, "dev-9").await.unwrap();
    assert_eq!(
        targets,
        vec!["/aws/lambda/dev-9-getUserRole", "dev-9-eks-cluster"]
    );
}

#[tokio::test]
async fn first_api_error_halts_the_run() {
    let mut api = FakeLogs::with_groups(&["dev-9-a", "dev-9-b", "dev-9-c"]);
    api.deny = Some("dev-9-b".to_string());
    let groups = api.groups.clone();
    let cleaner = LogGroupCleaner::new(api);

    let targets = plan(&cleaner, "dev-9").await.unwrap();
    let err = execute(&cleaner, "dev-9", &targets).await.unwrap_err();

    assert!(err.to_string().contains("AccessDeniedException"));
    assert!(err.to_string().contains("dev-9-b"));
    // dev-9-c is never attempted
    assert_eq!(*groups.lock(), vec!["dev-9-b", "dev-9-c"]);
}

// ---------------------------------------------------------------- eks

#[derive(Clone, Default)]
struct FakeEks {
    clusters: Arc<Mutex<BTreeMap<String, Vec<String>>>>,
    /// Node groups that never finish deleting.
    stuck: bool,
    calls: CallLog,
}

impl FakeEks {
    fn add(&self, cluster: &str, nodegroups: &[&str]) {
        self.clusters.lock().insert(
            cluster.to_string(),
            nodegroups.iter().map(|n| n.to_string()).collect(),
        );
    }
}

#[async_trait]
impl EksApi for FakeEks {
    async fn list_clusters(&self) -> Result<Vec<String>> {
        Ok(self.clusters.lock().keys().cloned().collect())
    }

    async fn list_nodegroups(&self, cluster: &str) -> Result<Vec<String>> {
        Ok(self
            .clusters
            .lock()
            .get(cluster)
            .cloned()
            .unwrap_or_default())
    }

    async fn delete_nodegroup(&self, cluster: &str, nodegroup: &str) -> Result<()> {
        record(&self.calls, format!("delete_nodegroup {}", nodegroup));
        if !self.stuck {
            if let Some(groups) = self.clusters.lock().get_mut(cluster) {
                groups.retain(|g| g != nodegroup);
            }
        }
        Ok(())
    }

    async fn delete_cluster(&self, cluster: &str) -> Result<()> {
        record(&self.calls, format!("delete_cluster {}", cluster));
        self.clusters.lock().remove(cluster);
        Ok(())
    }

    async fn cluster_exists(&self, cluster: &str) -> Result<bool> {
        Ok(self.clusters.lock().contains_key(cluster))
    }
}

#[tokio::test]
async fn node_groups_go_before_their_cluster() {
    let api = FakeEks::default();
    api.add("dev-9-cluster", &["dev-9-ng-a", "dev-9-ng-b"]);
    api.add("uat-cluster", &["uat-ng"]);
    let calls = api.calls.clone();
    let clusters = api.clusters.clone();
    let cleaner = EksCleaner::new(api, quick_wait(3));

    let targets = plan(&cleaner, "dev-9").await.unwrap();
    assert_eq!(targets, vec!["dev-9-cluster"]);
    execute(&cleaner, "dev-9", &targets).await.unwrap();

    assert_eq!(
        *calls.lock(),
        vec![
            "delete_nodegroup dev-9-ng-a",
            "delete_nodegroup dev-9-ng-b",
            "delete_cluster dev-9-cluster",
        ]
    );
    assert!(clusters.lock().contains_key("uat-cluster"));
}

#[tokio::test]
async fn only_prefixed_node_groups_are_deleted() {
    let api = FakeEks::default();
    api.add("dev-9-cluster", &["dev-9-ng", "shared-ng"]);
    let calls = api.calls.clone();
    let cleaner = EksCleaner::new(api, quick_wait(2));

    // shared-ng stays, so the cluster never becomes deletable
    let err = execute(&cleaner, "dev-9", &["dev-9-cluster".to_string()])
        .await
        .unwrap_err();

    assert!(matches!(err, CleanupError::Timeout { .. }));
    assert_eq!(*calls.lock(), vec!["delete_nodegroup dev-9-ng"]);
}

#[tokio::test]
async fn node_group_wait_is_bounded() {
    let api = FakeEks {
        stuck: true,
        ..FakeEks::default()
    };
    api.add("dev-9-cluster", &["dev-9-ng"]);
    let calls = api.calls.clone();
    let cleaner = EksCleaner::new(api, quick_wait(3));

    let err = execute(&cleaner, "dev-9", &["dev-9-cluster".to_string()])
        .await
        .unwrap_err();

    match err {
        CleanupError::Timeout { what, attempts, .. } => {
            assert_eq!(what, "node groups of dev-9-cluster");
            assert_eq!(attempts, 3);
        }
        other => panic!("expected a timeout, got {other:?}"),
    }
    assert!(!calls.lock().iter().any(|c| c.starts_with("delete_cluster")));
}

// ---------------------------------------------------------------- iam

#[derive(Default)]
struct FakeIam {
    policies: Vec<Policy>,
    attachments: HashMap<String, PolicyAttachments>,
    versions: HashMap<String, Vec<PolicyVersion>>,
    calls: CallLog,
}

#[async_trait]
impl IamApi for FakeIam {
    async fn list_local_policies(&self) -> Result<Vec<Policy>> {
        Ok(self.policies.clone())
    }

    async fn list_attachments(&self, policy_arn: &str) -> Result<PolicyAttachments> {
        Ok(self.attachments.get(policy_arn).cloned().unwrap_or_default())
    }

    async fn detach_user(&self, user: &str, _policy_arn: &str) -> Result<()> {
        record(&self.calls, format!("detach_user {}", user));
        Ok(())
    }

    async fn detach_role(&self, role: &str, _policy_arn: &str) -> Result<()> {
        record(&self.calls, format!("detach_role {}", role));
        Ok(())
    }

    async fn detach_group(&self, group: &str, _policy_arn: &str) -> Result<()> {
        record(&self.calls, format!("detach_group {}", group));
        Ok(())
    }

    async fn list_policy_versions(&self, policy_arn: &str) -> Result<Vec<PolicyVersion>> {
        Ok(self.versions.get(policy_arn).cloned().unwrap_or_default())
    }

    async fn delete_policy_version(&self, _policy_arn: &str, version_id: &str) -> Result<()> {
        record(&self.calls, format!("delete_version {}", version_id));
        Ok(())
    }

    async fn delete_policy(&self, policy_arn: &str) -> Result<()> {
        record(&self.calls, format!("delete_policy {}", policy_arn));
        Ok(())
    }
}

#[tokio::test]
async fn policy_is_detached_and_pruned_before_delete() {
    let arn = "arn:aws:iam::123456789012:policy/dev-9-lambda-s3";
    let api = FakeIam {
        policies: vec![
            Policy {
                name: "dev-9-lambda-s3".to_string(),
                arn: arn.to_string(),
            },
            Policy {
                name: "uat-lambda-s3".to_string(),
                arn: "arn:aws:iam::123456789012:policy/uat-lambda-s3".to_string(),
            },
        ],
        attachments: HashMap::from([(
            arn.to_string(),
            PolicyAttachments {
                users: vec!["ci".to_string()],
                roles: vec!["dev-9-lambda-role".to_string()],
                groups: vec!["ops".to_string()],
            },
        )]),
        versions: HashMap::from([(
            arn.to_string(),
            vec![
                PolicyVersion {
                    id: "v1".to_string(),
                    is_default: false,
                },
                PolicyVersion {
                    id: "v2".to_string(),
                    is_default: true,
                },
            ],
        )]),
        calls: CallLog::default(),
    };
    let calls = api.calls.clone();
    let cleaner = IamPolicyCleaner::new(api);

    let targets = plan(&cleaner, "dev-9").await.unwrap();
    assert_eq!(targets, vec!["dev-9-lambda-s3"]);
    execute(&cleaner, "dev-9", &targets).await.unwrap();

    assert_eq!(
        *calls.lock(),
        vec![
            "detach_user ci".to_string(),
            "detach_role dev-9-lambda-role".to_string(),
            "detach_group ops".to_string(),
            "delete_version v1".to_string(),
            format!("delete_policy {}", arn),
        ]
    );
}

#[tokio::test]
async fn unknown_policy_name_is_an_api_error() {
    let cleaner = IamPolicyCleaner::new(FakeIam::default());
    let err = execute(&cleaner, "dev-9", &["dev-9-gone".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(err, CleanupError::Api { .. }));
}

// ---------------------------------------------------------------- s3

#[derive(Default)]
struct FakeS3 {
    buckets: Vec<String>,
    versions: usize,
    calls: CallLog,
}

#[async_trait]
impl S3Api for FakeS3 {
    async fn list_buckets(&self) -> Result<Vec<String>> {
        Ok(self.buckets.clone())
    }

    async fn list_object_versions(&self, _bucket: &str) -> Result<Vec<ObjectId>> {
        Ok((0..self.versions)
            .map(|n| ObjectId {
                key: format!("key-{}", n),
                version_id: Some(format!("v{}", n)),
            })
            .collect())
    }

    async fn list_objects(&self, _bucket: &str) -> Result<Vec<String>> {
        Ok(vec!["unversioned.csv".to_string()])
    }

    async fn delete_objects(&self, _bucket: &str, objects: &[ObjectId]) -> Result<()> {
        let kind = if objects.iter().all(|o| o.version_id.is_some()) {
            "versions"
        } else {
            "current"
        };
        record(
            &self.calls,
            format!("delete_objects {} {}", kind, objects.len()),
        );
        Ok(())
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<()> {
        record(&self.calls, format!("delete_bucket {}", bucket));
        Ok(())
    }
}

#[tokio::test]
async fn bucket_is_emptied_in_bounded_requests() {
    let api = FakeS3 {
        buckets: vec![
            "dev-9-galleri-processed".to_string(),
            "prod-dev-9-data".to_string(),
        ],
        versions: 2500,
        calls: CallLog::default(),
    };
    let calls = api.calls.clone();
    let cleaner = BucketCleaner::new(api);

    let targets = plan(&cleaner, "dev-9").await.unwrap();
    assert_eq!(targets, vec!["dev-9-galleri-processed"]);
    execute(&cleaner, "dev-9", &targets).await.unwrap();

    assert_eq!(
        *calls.lock(),
        vec![
            "delete_objects versions 1000",
            "delete_objects versions 1000",
            "delete_objects versions 500",
            "delete_objects current 1",
            "delete_bucket dev-9-galleri-processed",
        ]
    );
}
