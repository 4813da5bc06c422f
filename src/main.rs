use clap::Parser;
use error_analyzer::{analyzer, cli, config, error, interactive, normalizer, render};
use analyzer::{Analysis, GeminiClient, ModelService};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use error_analyzer_common::AnalysisRequest;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

#[tokio::main]
async fn main() {
    // .env があれば読み込む（無くてもよい）
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { input, json } => {
            // APIキーが無ければ入力を読む前に終了
            let client = GeminiClient::from_config(&config)?;
            let request = input.into_request()?;
            run_analysis(&client, request, json).await?;
        }

        Commands::Interactive { json, input_type } => {
            let client = GeminiClient::from_config(&config)?;
            match interactive::collect_request(input_type)? {
                Some(request) => run_analysis(&client, request, json).await?,
                None => println!("キャンセルしました"),
            }
        }

        Commands::Prompt { input } => {
            let request = input.into_request()?;
            let normalized = normalizer::normalize(request)?;
            let model = config.model_for(normalized.image().is_some());
            if let Some(image) = normalized.image() {
                println!(
                    "# image: {:?} {} {}x{} ({} bytes)",
                    image.format(),
                    image.mime_type(),
                    image.width(),
                    image.height(),
                    image.bytes().len()
                );
            }
            println!("# model: {}", model);
            println!("{}", analyzer::prompt_for(&normalized));
        }

        Commands::Config { show, set_text_model, set_vision_model, set_base_url } => {
            // 保存するのはファイルの内容のみ（環境変数の上書きは含めない）
            let mut stored = Config::load_from(&Config::config_path()?)?;
            let mut changed = false;

            if let Some(model) = set_text_model {
                stored.text_model = model;
                changed = true;
            }
            if let Some(model) = set_vision_model {
                stored.vision_model = model;
                changed = true;
            }
            if let Some(url) = set_base_url {
                stored.base_url = url;
                changed = true;
            }
            if changed {
                stored.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                let effective = if changed { Config::load()? } else { config };
                println!("設定:");
                println!("  ベースURL: {}", effective.base_url);
                println!("  テキスト用モデル: {}", effective.text_model);
                println!("  画像用モデル: {}", effective.vision_model);
                println!("  APIキー: {}", if effective.api_key.is_some() { "設定済み" } else { "未設定" });
            }
        }
    }

    Ok(())
}

async fn run_analysis<M>(model: &M, request: AnalysisRequest, json: bool) -> Result<()>
where
    M: ModelService + ?Sized,
{
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Analyzing ({})...", request.modality()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = analyzer::analyze(model, request).await;
    spinner.finish_and_clear();

    let Analysis { response, .. } = result?;
    if json {
        println!("{}", response.to_json_envelope()?);
    } else {
        print!("{}", render::render_response(&response));
    }
    Ok(())
}
