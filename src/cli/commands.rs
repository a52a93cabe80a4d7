//! Command implementations dispatched from `run()`.

use std::io::Write as _;

use camino::Utf8PathBuf;
use resttest_config::{CliArgs as ConfigCliArgs, Config};
use resttest_engine::{
    render_as_curl, render_exchange, snapshot_expectation, GenerationController, RequestController,
    RunController,
};
use resttest_fs::RealFileSystem;
use resttest_model::{Capture, TestCase, TestSuite};
use resttest_selectors::{FilePatternFilter, Selector, TagManager};
use resttest_transport::ReqwestTransport;
use resttest_utils::ExitCode;

use super::args::{GenCommands, ReqCommands};

pub struct RunArgs {
    pub config_path: Option<Utf8PathBuf>,
    pub test_dirs: Vec<Utf8PathBuf>,
    pub incl_files: Vec<String>,
    pub excl_files: Vec<String>,
    pub test_name: Option<String>,
    pub tags: Vec<String>,
    pub no_color: bool,
}

fn discover_config(args: &RunArgs) -> Result<Config, ExitCode> {
    let cli_args = ConfigCliArgs {
        config_path: args.config_path.clone(),
        test_dirs: args.test_dirs.clone(),
        incl_files: args.incl_files.clone(),
        excl_files: args.excl_files.clone(),
        test_name: args.test_name.clone(),
        tags: args.tags.clone(),
        no_color: args.no_color,
    };
    Config::discover(&cli_args).map_err(|e| {
        eprintln!("✗ configuration error: {e}");
        ExitCode::MISCONFIGURATION
    })
}

pub async fn execute_run_command(args: RunArgs) -> Result<(), ExitCode> {
    let config = discover_config(&args)?;

    let fs = RealFileSystem;
    let transport = ReqwestTransport::new();
    let controller = RunController::new(&fs, &transport);

    let file_filter = FilePatternFilter::new(config.incl_files.clone(), config.excl_files.clone());
    let selector = Selector::new(config.test_name.as_deref().unwrap_or(""));
    let tag_manager = TagManager::new(&config.tags);

    let summary = controller.run(&config.test_dirs, &file_filter, &selector, &tag_manager).await;

    for error in &summary.load_errors {
        eprintln!("✗ {error}");
    }
    for case in &summary.cases {
        print_case_report(case, config.no_color);
    }

    println!(
        "\n{} files, {} cases: {} pending, {} skipped, {} success, {} failure, {} cracked ({:.2?})",
        summary.total_files,
        summary.total_cases,
        summary.counters.pending,
        summary.counters.skipped,
        summary.counters.success,
        summary.counters.failure,
        summary.counters.cracked,
        summary.elapsed,
    );

    if summary.counters.any_red() || !summary.load_errors.is_empty() {
        Err(ExitCode::FAILURE)
    } else {
        Ok(())
    }
}

fn print_case_report(case: &resttest_engine::CaseReport, no_color: bool) {
    let (glyph, color) = match case.status {
        resttest_engine::CaseStatus::Pending => ("~", "33"),
        resttest_engine::CaseStatus::Ok => ("✓", "32"),
        resttest_engine::CaseStatus::Error => ("✗", "31"),
    };
    if no_color {
        println!("{glyph} {} [{}] ({:.2?})", case.title, case.file, case.duration);
    } else {
        println!("\x1b[{color}m{glyph}\x1b[0m {} [{}] ({:.2?})", case.title, case.file, case.duration);
    }
    for (key, message) in &case.errors {
        println!("    {key}: {message}");
    }
}

pub async fn execute_gen_curl_command(cmd: GenCommands) -> Result<(), ExitCode> {
    let GenCommands::Curl { config_path, test_dirs, incl_files, excl_files, test_name, tags } = cmd;
    let config = discover_config(&RunArgs {
        config_path,
        test_dirs,
        incl_files,
        excl_files,
        test_name,
        tags,
        no_color: false,
    })?;

    let fs = RealFileSystem;
    let controller = GenerationController::new(&fs);
    let file_filter = FilePatternFilter::new(config.incl_files, config.excl_files);
    let selector = Selector::new(config.test_name.as_deref().unwrap_or(""));
    let tag_manager = TagManager::new(&config.tags);

    let case = controller
        .resolve_single_case(&config.test_dirs, &file_filter, &selector, &tag_manager)
        .map_err(|e| {
            eprintln!("✗ {e}");
            ExitCode::MISCONFIGURATION
        })?;

    println!("{}", render_as_curl(&case.request));
    Ok(())
}

pub async fn execute_req_curl_command(cmd: ReqCommands) -> Result<(), ExitCode> {
    let ReqCommands::Curl { method, url, headers, data, snapshot, export_testcase } = cmd;

    let header_pairs: Vec<(String, String)> = headers
        .iter()
        .filter_map(|h| h.split_once(':').map(|(n, v)| (n.trim().to_string(), v.trim().to_string())))
        .collect();

    let request = resttest_model::HttpRequest {
        method: Some(method),
        url: Some(url),
        pdp: None,
        path: None,
        headers: resttest_engine::header_vec(&header_pairs),
        body: data,
        timeout: None,
    };

    let transport = ReqwestTransport::new();
    let controller = RequestController::new(&transport);
    let response = controller.invoke(&request).await.map_err(|e| {
        eprintln!("✗ request failed: {e}");
        ExitCode::FAILURE
    })?;

    if snapshot {
        let suite = TestSuite {
            test_cases: vec![TestCase {
                title: export_testcase,
                version: None,
                request: request.clone(),
                capture: Some(Capture { store_id: "snapshot".to_string() }),
                expectation: Some(snapshot_expectation(&response)),
                pending: false,
                tags: Vec::new(),
                created_time: None,
            }],
            pending: false,
        };
        let rendered = serde_yaml::to_string(&suite).map_err(|e| {
            eprintln!("✗ failed to render snapshot: {e}");
            ExitCode::FAILURE
        })?;
        std::io::stdout().write_all(rendered.as_bytes()).ok();
    } else {
        println!("{}", render_exchange(&request, &response));
    }

    Ok(())
}
