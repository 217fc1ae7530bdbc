use super::*;
use crate::dependency_analysis::domain::{
    LicenseCapabilities, LicenseCategory, LicenseObligations, LicenseRiskLevel, RiskAssessment,
    RiskBreakdown, SecuritySignals,
};
use crate::dependency_analysis::services::{GraphFilter, ResolverConfig};
use crate::ports::outbound::PackageMetadata;
use crate::shared::error::FetchError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

struct MockRegistry {
    packages: HashMap<String, (Vec<String>, Option<String>)>,
}

impl MockRegistry {
    fn flask() -> Self {
        let mut packages = HashMap::new();
        let mut add = |name: &str, deps: &[&str], license: Option<&str>| {
            packages.insert(
                name.to_string(),
                (
                    deps.iter().map(|d| d.to_string()).collect(),
                    license.map(str::to_string),
                ),
            );
        };
        add("flask", &["werkzeug>=3.0", "jinja2>=3.1.2", "click>=8.1.3"], Some("BSD-3-Clause"));
        add("werkzeug", &["MarkupSafe>=2.1.1"], Some("BSD-3-Clause"));
        add("jinja2", &["MarkupSafe>=2.0"], Some("BSD-3-Clause"));
        add("MarkupSafe", &[], Some("Proprietary"));
        Self { packages }
    }
}

#[async_trait]
impl RegistryClient for MockRegistry {
    async fn fetch(&self, name: &str) -> std::result::Result<PackageMetadata, FetchError> {
        let (deps, license) = self
            .packages
            .get(name)
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                name: name.to_string(),
            })?;
        Ok(PackageMetadata {
            name: name.to_string(),
            version: "1.0.0".to_string(),
            license,
            dependency_specifiers: deps,
            released_at: None,
            repository_url: None,
        })
    }
}

struct MockScorer;

#[async_trait]
impl RiskScorer for MockScorer {
    async fn score(
        &self,
        package: &PackageMetadata,
        _direct_dependencies: usize,
        _depth_level: usize,
    ) -> RiskAssessment {
        let (score, cves) = match package.name.as_str() {
            "jinja2" => (8.0, 2),
            "werkzeug" => (5.0, 0),
            _ => (1.0, 0),
        };
        RiskAssessment::new(
            Some(score),
            RiskBreakdown {
                security: Some(SecuritySignals {
                    cve_count: cves,
                    critical_cve_count: 0,
                    known_vulnerabilities: cves > 0,
                }),
                ..Default::default()
            },
        )
    }
}

#[derive(Default)]
struct MockLicenses {
    lookups: AtomicUsize,
}

impl LicenseService for MockLicenses {
    fn info(&self, license_identifier: &str) -> Option<LicenseDetails> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        (license_identifier == "BSD-3-Clause").then(|| LicenseDetails {
            spdx: "BSD-3-Clause".to_string(),
            category: LicenseCategory::Permissive,
            risk_level: LicenseRiskLevel::Low,
            capabilities: LicenseCapabilities {
                use_: true,
                modify: true,
                sell: true,
                saas: true,
            },
            obligations: LicenseObligations {
                attribution: true,
                include_license: true,
                state_changes: false,
                disclose_source: false,
                share_alike: false,
                network_copyleft: false,
            },
            localized_notes: BTreeMap::new(),
        })
    }
}

#[derive(Default)]
struct CapturingReporter {
    messages: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
    progress: Mutex<Vec<(usize, Option<String>)>>,
}

impl ProgressReporter for CapturingReporter {
    fn report(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }

    fn report_progress(&self, resolved: usize, message: Option<&str>) {
        self.progress
            .lock()
            .unwrap()
            .push((resolved, message.map(str::to_string)));
    }

    fn report_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }

    fn report_completion(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

fn use_case() -> AnalyzeDependenciesUseCase<MockRegistry, MockScorer, MockLicenses, CapturingReporter>
{
    AnalyzeDependenciesUseCase::new(
        DependencyResolver::new(MockRegistry::flask(), MockScorer, ResolverConfig::default()),
        MockLicenses::default(),
        CapturingReporter::default(),
    )
}

#[tokio::test]
async fn test_execute_builds_tree_graph_and_flat_list() {
    let use_case = use_case();
    let mut ctx = ResolutionContext::new();

    let response = use_case
        .execute(&mut ctx, AnalysisRequest::new("flask", 3))
        .await
        .unwrap();

    assert_eq!(response.tree.node_count(), 4);
    assert_eq!(response.graph.nodes.len(), 4);
    assert_eq!(response.scored_dependencies.len(), 4);
    assert_eq!(response.graph.node("jinja2").unwrap().group, 1);
    assert_eq!(response.graph.node("werkzeug").unwrap().group, 3);
    assert_eq!(response.vulnerable_packages(), vec!["jinja2"]);
    assert!(response.has_vulnerabilities());

    // click is listed by flask but missing from the registry
    assert!(response.is_partial());
    assert_eq!(response.omitted.len(), 1);
    assert_eq!(response.omitted[0].name, "click");
    assert_eq!(response.omitted[0].kind, "not_found");
}

#[tokio::test]
async fn test_execute_applies_filter_to_graph_only() {
    let use_case = use_case();
    let mut ctx = ResolutionContext::new();
    let request = AnalysisRequest::new("flask", 3).with_filter(GraphFilter {
        min_risk_score: Some(4.5),
        ..Default::default()
    });

    let response = use_case.execute(&mut ctx, request).await.unwrap();

    let ids: Vec<_> = response.graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["jinja2", "werkzeug"]);
    assert!(response.graph.links.is_empty());
    assert_eq!(response.tree.node_count(), 4);
}

#[tokio::test]
async fn test_execute_reports_omitted_packages() {
    let use_case = use_case();
    let mut ctx = ResolutionContext::new();

    let response = use_case
        .execute(&mut ctx, AnalysisRequest::new("flask", 3))
        .await
        .unwrap();

    // click is referenced by flask but unknown to the registry
    assert_eq!(response.omitted.len(), 1);
    assert_eq!(response.omitted[0].name, "click");
    assert!(response.is_partial());
    let errors = use_case.progress_reporter.errors.lock().unwrap();
    assert!(errors.iter().any(|e| e.contains("click")));
}

#[tokio::test]
async fn test_execute_reports_running_progress() {
    let use_case = use_case();
    let mut ctx = ResolutionContext::new();

    use_case
        .execute(&mut ctx, AnalysisRequest::new("flask", 3))
        .await
        .unwrap();

    let progress = use_case.progress_reporter.progress.lock().unwrap();
    let counts: Vec<usize> = progress.iter().map(|(count, _)| *count).collect();
    assert_eq!(counts, vec![0, 1, 2, 3, 4, 4]);
    assert_eq!(progress[2].1.as_deref(), Some("werkzeug"));
    assert_eq!(progress[3].1.as_deref(), Some("MarkupSafe"));
}

#[tokio::test]
async fn test_execute_collects_each_license_once() {
    let use_case = use_case();
    let mut ctx = ResolutionContext::new();

    let response = use_case
        .execute(&mut ctx, AnalysisRequest::new("flask", 3))
        .await
        .unwrap();

    assert_eq!(response.licenses.len(), 1);
    assert!(response.licenses.contains_key("BSD-3-Clause"));
    // BSD-3-Clause once, Proprietary once
    assert_eq!(use_case.license_service.lookups.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_execute_rejects_invalid_root_name() {
    let use_case = use_case();
    let mut ctx = ResolutionContext::new();

    let result = use_case
        .execute(&mut ctx, AnalysisRequest::new("../etc/passwd", 3))
        .await;

    assert!(result.is_err());
    assert_eq!(ctx.visited_count(), 0);
}

#[tokio::test]
async fn test_execute_fails_when_root_cannot_be_fetched() {
    let use_case = use_case();
    let mut ctx = ResolutionContext::new();

    let err = use_case
        .execute(&mut ctx, AnalysisRequest::new("does-not-exist", 3))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("does-not-exist"));
}

#[tokio::test]
async fn test_reused_context_requires_reset() {
    let use_case = use_case();
    let mut ctx = ResolutionContext::new();

    use_case
        .execute(&mut ctx, AnalysisRequest::new("werkzeug", 3))
        .await
        .unwrap();
    let second = use_case
        .execute(&mut ctx, AnalysisRequest::new("jinja2", 3))
        .await
        .unwrap();
    assert!(!second.tree.contains("MarkupSafe"));

    ctx.reset();
    let third = use_case
        .execute(&mut ctx, AnalysisRequest::new("jinja2", 3))
        .await
        .unwrap();
    assert!(third.tree.contains("MarkupSafe"));
}

#[tokio::test]
async fn test_port_delegates_to_execute() {
    let use_case = use_case();
    let port: &dyn DependencyAnalysisPort = &use_case;
    let mut ctx = ResolutionContext::new();

    let response = port
        .analyze(&mut ctx, AnalysisRequest::new("jinja2", 0))
        .await
        .unwrap();

    assert_eq!(response.tree.node_count(), 1);
    assert_eq!(response.tree.edges().len(), 1);
}
