//! Multi-domain fan-out
//!
//! Runs one domain crawl per input domain in one of two modes with the same
//! output contract:
//!
//! - **Concurrent**: every domain is a tokio task inside this process,
//!   sharing one HTTP client but nothing else.
//! - **Parallel**: every domain runs in an isolated worker OS process (this
//!   executable re-invoked with a hidden worker flag), with its own runtime,
//!   client, and rate limiter; results come back as JSON over stdout.
//!
//! In both modes a single domain's unrecoverable failure is captured as a
//! failed [`DomainResult`] for that domain only. Ctrl-C stops issuing new
//! work, terminates outstanding workers, and returns whatever results were
//! already aggregated so they can still be persisted.

use crate::config::CrawlConfig;
use crate::crawler::{build_http_client, crawl_domain};
use crate::report::{CrawlReport, DomainResult};
use std::path::Path;
use std::process::Stdio;
use tokio::process::{Child, Command};

/// Crawls all domains as concurrent tasks within this process
pub async fn run_concurrent(
    domains: &[String],
    config: &CrawlConfig,
) -> crate::Result<CrawlReport> {
    let client = build_http_client(config.request_timeout())?;

    let mut handles = Vec::with_capacity(domains.len());
    for domain in domains {
        let domain = domain.clone();
        let config = config.clone();
        let client = client.clone();
        let task = tokio::spawn(async move { crawl_domain(&domain, &config, &client).await });
        handles.push(task);
    }

    let mut results = CrawlReport::new();
    let mut interrupted = false;

    for (domain, mut handle) in domains.iter().cloned().zip(handles) {
        if interrupted {
            handle.abort();
            continue;
        }

        tokio::select! {
            joined = &mut handle => {
                let result = joined.unwrap_or_else(|e| {
                    tracing::error!("Crawl task for {} did not complete: {}", domain, e);
                    DomainResult::failed(format!("domain crawl task failed: {}", e))
                });
                results.insert(domain, result);
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupt received, stopping remaining domain crawls");
                handle.abort();
                interrupted = true;
            }
        }
    }

    Ok(results)
}

/// Crawls all domains in isolated worker processes, at most `processes` at a
/// time
pub async fn run_parallel(
    domains: &[String],
    config: &CrawlConfig,
    processes: usize,
) -> crate::Result<CrawlReport> {
    let processes = processes.max(1);
    let exe = std::env::current_exe()?;
    let config_json = serde_json::to_string(config)?;

    tracing::info!(
        "Starting parallel crawl of {} domains with up to {} worker processes",
        domains.len(),
        processes
    );

    let mut results = CrawlReport::new();
    let mut interrupted = false;

    for chunk in domains.chunks(processes) {
        if interrupted {
            break;
        }

        let workers: Vec<(String, std::io::Result<Child>)> = chunk
            .iter()
            .map(|domain| (domain.clone(), spawn_worker(&exe, domain, &config_json)))
            .collect();

        for (domain, spawned) in workers {
            let child = match spawned {
                Ok(child) => child,
                Err(e) => {
                    tracing::error!("Failed to spawn worker for {}: {}", domain, e);
                    results.insert(
                        domain,
                        DomainResult::failed(format!("failed to spawn worker process: {}", e)),
                    );
                    continue;
                }
            };

            if interrupted {
                // kill_on_drop terminates the child as it falls out of scope
                continue;
            }

            tokio::select! {
                output = child.wait_with_output() => {
                    results.insert(domain.clone(), worker_result(&domain, output));
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupt received, terminating outstanding workers");
                    interrupted = true;
                }
            }
        }
    }

    Ok(results)
}

/// Runs the worker side of parallel mode: crawl one domain, emit its result
/// as JSON on stdout
///
/// The worker exits 0 even when the domain crawl failed — the failure lives
/// inside the emitted result, per the orchestrator contract.
pub async fn run_worker(domain: &str, config: &CrawlConfig) -> crate::Result<()> {
    let result = match build_http_client(config.request_timeout()) {
        Ok(client) => crawl_domain(domain, config, &client).await,
        Err(e) => DomainResult::failed(format!("failed to build HTTP client: {}", e)),
    };

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}

fn spawn_worker(exe: &Path, domain: &str, config_json: &str) -> std::io::Result<Child> {
    Command::new(exe)
        .arg("--worker")
        .arg(domain)
        .arg("--config")
        .arg(config_json)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .kill_on_drop(true)
        .spawn()
}

/// Folds a worker's exit into the standard per-domain result contract
fn worker_result(
    domain: &str,
    output: std::io::Result<std::process::Output>,
) -> DomainResult {
    match output {
        Ok(output) if output.status.success() => {
            match serde_json::from_slice::<DomainResult>(&output.stdout) {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!("Unparseable worker output for {}: {}", domain, e);
                    DomainResult::failed(format!("unparseable worker output: {}", e))
                }
            }
        }
        Ok(output) => {
            tracing::error!("Worker for {} exited with {}", domain, output.status);
            DomainResult::failed(format!("worker process exited with {}", output.status))
        }
        Err(e) => {
            tracing::error!("Worker for {} could not be awaited: {}", domain, e);
            DomainResult::failed(format!("worker process error: {}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::process::ExitStatusExt;
    use std::process::{ExitStatus, Output};

    fn output(status: ExitStatus, stdout: Vec<u8>) -> std::io::Result<Output> {
        Ok(Output {
            status,
            stdout,
            stderr: Vec::new(),
        })
    }

    #[test]
    fn test_worker_result_parses_success_payload() {
        let payload = serde_json::to_vec(&DomainResult::failed("inner failure")).unwrap();
        let result = worker_result("example.com", output(ExitStatus::from_raw(0), payload));

        // The worker exited 0; the failure it reports is the domain's own
        assert_eq!(result.error.as_deref(), Some("inner failure"));
    }

    #[test]
    fn test_worker_result_garbage_stdout_is_failed() {
        let result = worker_result(
            "example.com",
            output(ExitStatus::from_raw(0), b"not json".to_vec()),
        );
        assert!(result.error.as_deref().unwrap().contains("unparseable"));
        assert!(result.product_urls.is_empty());
        assert_eq!(result.stats.status.as_deref(), Some("failed"));
    }

    #[test]
    fn test_worker_result_crash_is_failed() {
        // Signal-terminated child (e.g. SIGKILL)
        let status = ExitStatus::from_raw(9);
        let result = worker_result("example.com", output(status, Vec::new()));
        assert!(result.error.is_some());
        assert_eq!(result.stats.status.as_deref(), Some("failed"));
    }

    #[test]
    fn test_worker_result_io_error_is_failed() {
        let result = worker_result(
            "example.com",
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone")),
        );
        assert!(result.error.as_deref().unwrap().contains("gone"));
    }
}
