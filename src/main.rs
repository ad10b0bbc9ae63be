use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use dialoguer::{Confirm, Input, Password};
use jeonsafe::api::Channel;
use jeonsafe::evidence::BucketKey;
use jeonsafe::files::{DownloadStore, FileCategory};
use jeonsafe::forms::Field;
use jeonsafe::report::{publish_report, ReportBuilder};
use jeonsafe::shell::{display_name, AuthMode, AuthPanel, HistoryDrawer};
use jeonsafe::wizard::{step_bar, StepState, Track};
use jeonsafe::workflow::{self, AnalysisStatus, SectionResult};
use jeonsafe::{AppState, Config};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jeonsafe")]
#[command(version, about = "Lease contract risk review and post-incident evidence assistant", long_about = None)]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Debug logging for this crate
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session token
    Login {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },

    /// Sign out locally and on the server
    Logout,

    /// Show the signed-in user
    Me,

    /// Create an account
    Signup {
        #[arg(long)]
        email: Option<String>,
    },

    /// Delete the signed-in account
    DeleteAccount,

    /// Upload files as the current batch of a track
    Upload {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// contract, message, transfer or other
        #[arg(long, default_value = "contract")]
        category: FileCategory,
        #[arg(long, default_value = "pre")]
        track: Track,
    },

    /// Analyze the current batch
    Analyze,

    /// List risky sentences of the current batch
    Risks,

    /// Sort the current batch into evidence buckets
    Evidence,

    /// Related laws and cases of one document
    Mapping {
        /// File id (defaults to the first document)
        #[arg(long)]
        file: Option<i64>,
    },

    /// Related laws and cases across the whole batch
    Simulate {
        #[arg(long)]
        file: Option<i64>,
    },

    /// Build, save, and publish a mapping report
    Report {
        #[arg(long)]
        file: Option<i64>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, default_value = "pre")]
        track: Track,
    },

    /// Saved reports of a track
    Threads {
        #[arg(long, default_value = "pre")]
        track: Track,
        /// Download the report of this thread id
        #[arg(long)]
        download: Option<i64>,
    },

    /// Render the step bar of a track at a route
    Steps {
        #[arg(long, default_value = "pre")]
        track: Track,
        #[arg(long)]
        path: Option<String>,
    },

    /// Configuration helpers
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the JSON Schema of the config file
    Schema,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("jeonsafe=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jeonsafe=info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Token cancelled on Ctrl-C so in-flight results are not written back.
fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let child = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupted");
            child.cancel();
        }
    });
    token
}

fn require_auth(state: &AppState) -> Result<()> {
    if !state.session.require_auth() {
        bail!("로그인이 필요합니다. `jeonsafe login`을 먼저 실행하세요.");
    }
    Ok(())
}

fn prompt_email(given: Option<String>) -> Result<String> {
    match given {
        Some(email) => Ok(email),
        None => Ok(Input::<String>::new().with_prompt("이메일").interact_text()?),
    }
}

fn print_section<T>(title: &str, section: &SectionResult<T>, render: impl Fn(&T)) {
    println!("\n[{title}]");
    match section {
        SectionResult::Ready(items) if items.is_empty() => println!("  검색 결과가 없습니다."),
        SectionResult::Ready(items) => items.iter().for_each(render),
        SectionResult::NoQuery => println!("  검색할 입력이 없습니다."),
        SectionResult::Error(msg) => println!("  오류: {msg}"),
        SectionResult::Cancelled => println!("  취소됨"),
    }
}

fn print_laws(laws: &SectionResult<jeonsafe::legal::LawWithArticles>) {
    print_section("관련 법령", laws, |law| {
        println!("  {} ({}개 조항)", law.law_name, law.articles.len());
        for a in &law.articles {
            println!("    {} {}", a.title, a.text);
        }
    });
}

fn print_cases(cases: &SectionResult<jeonsafe::legal::CaseItem>) {
    print_section("관련 판례", cases, |c| {
        println!("  {} | {} · {}", c.name, c.court, c.date);
        if let Some(summary) = &c.summary {
            println!("    {summary}");
        }
    });
}

async fn run(cli: Cli) -> Result<()> {
    if let Commands::Config { action: ConfigCommands::Schema } = &cli.command {
        println!("{}", Config::json_schema()?);
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref())?;
    let state = AppState::open(config).context("Failed to open local state")?;
    state.restore_workspace()?;
    let cancel = cancel_on_ctrl_c();

    match cli.command {
        Commands::Login { email, password } => {
            let mut panel = AuthPanel::new();
            panel.login.form.change(Field::Email, prompt_email(email)?);
            let password = match password {
                Some(p) => p,
                None => Password::new().with_prompt("비밀번호").interact()?,
            };
            panel.login.form.change(Field::Password, password);
            for field in [Field::Email, Field::Password] {
                panel.login.form.blur(field);
                if let Some(err) = panel.login.form.visible_error(field) {
                    bail!("{err}");
                }
            }
            if !panel.submit_login(&state.session).await {
                bail!("{}", panel.error.unwrap_or_default());
            }
            println!("{} 님, 환영합니다.", display_name(state.session.user().as_ref()));
        }
        Commands::Logout => {
            state.session.logout().await?;
            println!("로그아웃되었습니다.");
        }
        Commands::Me => {
            require_auth(&state)?;
            state.session.fetch_me().await?;
            match state.session.user() {
                Some(user) => println!("{} <{}>", display_name(Some(&user)), user.email),
                None => bail!("로그인 정보를 불러오는 데 실패했습니다."),
            }
        }
        Commands::Signup { email } => {
            let mut panel = AuthPanel::new();
            panel.set_mode(AuthMode::Signup);
            panel.signup.form.change(Field::Email, prompt_email(email)?);
            panel
                .signup
                .form
                .change(Field::Password, Password::new().with_prompt("비밀번호").interact()?);
            panel
                .signup
                .change_confirm(Password::new().with_prompt("비밀번호 확인").interact()?);
            panel.signup.blur_confirm();
            for field in [Field::Email, Field::Password] {
                panel.signup.form.blur(field);
                if let Some(err) = panel.signup.form.visible_error(field) {
                    bail!("{err}");
                }
            }
            if let Some(err) = panel.signup.confirm_error() {
                bail!("{err}");
            }
            if !panel.submit_signup(&state.api).await {
                bail!("{}", panel.error.unwrap_or_default());
            }
            println!("{}", panel.info.unwrap_or_default());
        }
        Commands::DeleteAccount => {
            require_auth(&state)?;
            let sure = Confirm::new()
                .with_prompt("계정을 삭제할까요?")
                .default(false)
                .interact()?;
            if sure {
                let mut panel = AuthPanel::new();
                if !panel.delete_account(&state.session).await {
                    bail!("{}", panel.error.unwrap_or_default());
                }
                println!("계정이 삭제되었습니다.");
            }
        }
        Commands::Upload { paths, category, track } => {
            require_auth(&state)?;
            let mut files = Vec::with_capacity(paths.len());
            for path in &paths {
                files.push(workflow::read_upload_file(path).await?);
            }
            let records = workflow::upload_batch(&state, track, files, category, &cancel).await?;
            for r in &records {
                println!("{}\t{}\t{}", r.id, r.original_filename, r.content_type);
            }
            println!("다음 단계: {}", track.steps().get(1).map(|s| s.path).unwrap_or(""));
        }
        Commands::Analyze => {
            require_auth(&state)?;
            match workflow::ensure_analysis(&state, &cancel).await {
                AnalysisStatus::Empty => bail!("업로드된 문서가 없습니다."),
                AnalysisStatus::Failed(msg) => bail!("분석에 실패했습니다: {msg}"),
                status => tracing::debug!(?status, "analysis"),
            }
            for doc in state.uploads.docs() {
                match state.analysis.get(&doc.id.to_string()) {
                    Some(a) => println!(
                        "{}\t{}\t{}\t{}",
                        doc.name,
                        a.kind.as_deref().unwrap_or("-"),
                        a.rating.label.kor(),
                        a.rating.reasons.join(" / ")
                    ),
                    None => println!("{}\t분석 결과 없음", doc.name),
                }
            }
        }
        Commands::Risks => {
            require_auth(&state)?;
            for doc in workflow::risk_page(&state, &cancel).await? {
                println!("\n{} ({})", doc.doc.name, doc.doc.id);
                if doc.rows.is_empty() {
                    println!("  위험 조항이 없습니다.");
                }
                for row in &doc.rows {
                    println!("  [{}] p.{} {}", row.kor, row.page, row.sentence);
                    if !row.reason.is_empty() {
                        println!("      {}", row.reason);
                    }
                }
            }
        }
        Commands::Evidence => {
            require_auth(&state)?;
            let view = workflow::classify_view(&state, &cancel).await?;
            for key in BucketKey::ORDER {
                let items = view.buckets.items(key);
                println!("\n{} ({})", key.title(), items.len());
                for item in items {
                    if let Some(row) = view.rows.get(&item.id) {
                        let rating = row.rating.map(|r| r.kor().to_string()).unwrap_or_else(|| "-".into());
                        println!("  {} [{} / {}] {}", row.name, rating, row.tint, row.reasons.join(" / "));
                    }
                }
            }
        }
        Commands::Mapping { file } => {
            require_auth(&state)?;
            let view = workflow::mapping_view(&state, file, &cancel).await?;
            println!("{}", view.doc.name);
            if let Some(a) = &view.analysis {
                println!("위험도: {}", a.rating.label.kor());
            }
            println!("하이라이트: {}개", view.highlights.len());
            for h in view.placed(1) {
                let r = h.rect;
                println!(
                    "  p.1 #{} ({:.0}, {:.0}) {:.0}x{:.0}",
                    h.sentence_index + 1,
                    r.left,
                    r.top,
                    r.width,
                    r.height
                );
            }
            print_laws(&view.laws);
            print_cases(&view.cases);
        }
        Commands::Simulate { file } => {
            require_auth(&state)?;
            let view = workflow::simulate_view(&state, file, &cancel).await?;
            for entry in &view.entries {
                let label = entry
                    .analysis
                    .as_ref()
                    .map(|a| a.rating.label.kor().to_string())
                    .unwrap_or_else(|| "-".into());
                println!("{} [{}]", entry.doc.name, label);
            }
            print_laws(&view.laws);
            print_cases(&view.cases);
        }
        Commands::Report { file, title, track } => {
            require_auth(&state)?;
            let data = ReportBuilder::from_state(&state, file, &cancel).await?;
            let outcome = publish_report(&state, track, &data, title).await?;
            println!("저장됨: {}", outcome.local_path.display());
            if let Some(thread) = &outcome.thread {
                println!("히스토리에 등록됨 (thread {})", thread.id);
            }
            if let Some(err) = &outcome.error {
                println!("업로드 실패: {err}");
            }
        }
        Commands::Threads { track, download } => {
            require_auth(&state)?;
            let mut drawer = HistoryDrawer::new(state.api.clone());
            drawer.tab = track;
            drawer.open().await;
            if let Some(err) = &drawer.error {
                bail!("{err}");
            }
            match download {
                Some(id) => {
                    let thread = drawer
                        .threads(track)
                        .iter()
                        .find(|t| t.id == id)
                        .with_context(|| format!("thread {id} not found"))?;
                    let store = DownloadStore::new(state.config.download_dir());
                    match drawer.download(thread, &store).await {
                        Ok(path) => println!("{}", path.display()),
                        Err(msg) => bail!("{msg}"),
                    }
                }
                None => {
                    let rows = drawer.rows();
                    if rows.is_empty() {
                        println!("{}", drawer.empty_message());
                    }
                    for row in rows {
                        println!("{}\t{}\t{}", row.id, row.date, row.title);
                    }
                }
            }
        }
        Commands::Steps { track, path } => {
            let path = path.unwrap_or_else(|| track.entry_path().to_string());
            let channel: Channel = track.channel();
            println!("{track} ({})", channel.as_str());
            for view in step_bar(track, &path, state.config.wizard.gating) {
                let mark = match view.state {
                    StepState::Selected => "●",
                    StepState::Used => "✓",
                    StepState::Upcoming => "○",
                };
                let lock = if view.clickable { "" } else { " (잠김)" };
                println!("  {mark} {} {}{lock}", view.label, view.path);
            }
            println!("진행 위치: {}", state.progress.pos(track));
        }
        Commands::Config { .. } => {}
    }

    state.save_workspace()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(cli).await
}
