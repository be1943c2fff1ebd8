use abel_basis::core::config::CacheConfig;
use abel_basis::{BasisMethod, BasisName, BasisOptions, BasisRequest, BasisStore, DirectoryStore};
use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    let matches = Command::new("abel_basis")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Abel 변환 기저 행렬 캐시 도구")
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("조회/생성 메시지 출력"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("FILE")
                .help("JSON 설정 파일"),
        )
        .subcommand(
            Command::new("name")
                .about("요청에 해당하는 기저 파일 이름 출력")
                .args(request_args()),
        )
        .subcommand(
            Command::new("get")
                .about("기저 조회 (없으면 생성 후 저장)")
                .args(request_args())
                .arg(dir_arg()),
        )
        .subcommand(
            Command::new("list")
                .about("캐시 디렉토리의 기저 목록")
                .arg(dir_arg())
                .arg(
                    Arg::new("method")
                        .long("method")
                        .short('m')
                        .value_name("METHOD")
                        .help("특정 방법만 출력"),
                ),
        )
        .subcommand_required(true)
        .get_matches();

    let verbose = matches.get_flag("verbose");
    let default_filter = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result = load_config(&matches).and_then(|config| match matches.subcommand() {
        Some(("name", sub)) => handle_name(sub),
        Some(("get", sub)) => handle_get(sub, config),
        Some(("list", sub)) => handle_list(sub, config),
        _ => unreachable!("subcommand_required"),
    });

    if let Err(e) = result {
        eprintln!("❌ 오류: {:#}", e);
        process::exit(1);
    }
}

fn request_args() -> Vec<Arg> {
    vec![
        Arg::new("method")
            .required(true)
            .help("linbasex, onion_peeling, three_point, two_point"),
        Arg::new("size")
            .required(true)
            .value_parser(clap::value_parser!(usize))
            .help("이미지 폭 (기저 행 개수)"),
        Arg::new("nbf")
            .long("nbf")
            .value_name("N")
            .value_parser(clap::value_parser!(usize))
            .help("기저 함수 개수 (기본값: size)"),
        Arg::new("options")
            .long("options")
            .value_name("JSON")
            .help("linbasex 옵션, 예: '{\"legendre_orders\": [0, 2], \"clip\": 1}'"),
    ]
}

fn dir_arg() -> Arg {
    Arg::new("dir")
        .long("dir")
        .short('d')
        .value_name("DIR")
        .help("기저 캐시 디렉토리 (설정 파일과 ABEL_BASIS_DIR 보다 우선)")
}

fn load_config(matches: &ArgMatches) -> Result<CacheConfig> {
    let config = match matches.get_one::<String>("config") {
        Some(path) => CacheConfig::from_json_file(Path::new(path))?,
        None => CacheConfig::default(),
    };
    let mut config = config.with_env_overrides();
    config.verbose |= matches.get_flag("verbose");
    Ok(config)
}

fn parse_request(matches: &ArgMatches) -> Result<BasisRequest> {
    let method: BasisMethod = matches
        .get_one::<String>("method")
        .context("method 인자가 필요합니다")?
        .parse()?;
    let size = *matches.get_one::<usize>("size").context("size 인자가 필요합니다")?;
    let nbf = matches.get_one::<usize>("nbf").copied().unwrap_or(size);
    let options = match matches.get_one::<String>("options") {
        Some(text) => BasisOptions::from_json(text).context("옵션 JSON 파싱 실패")?,
        None => BasisOptions::default(),
    };

    Ok(BasisRequest::new(method, size, nbf).with_options(options))
}

fn handle_name(matches: &ArgMatches) -> Result<()> {
    let request = parse_request(matches)?;
    println!("{}", request.name().file_name());
    Ok(())
}

fn handle_get(matches: &ArgMatches, mut config: CacheConfig) -> Result<()> {
    let request = parse_request(matches)?;
    if let Some(dir) = matches.get_one::<String>("dir") {
        config.basis_dir = Some(PathBuf::from(dir));
    }

    let basis = config
        .build_cache()
        .get(&request, None)
        .with_context(|| format!("{} 기저를 얻지 못했습니다", request.method))?;

    let (rows, cols) = basis.dim();
    println!("✅ {} 기저: {} × {}", request.method, rows, cols);
    match &config.basis_dir {
        Some(dir) => println!("   캐시 디렉토리: {}", dir.display()),
        None => println!("   메모리 전용 (저장하지 않음)"),
    }
    Ok(())
}

fn handle_list(matches: &ArgMatches, config: CacheConfig) -> Result<()> {
    let dir = matches
        .get_one::<String>("dir")
        .map(PathBuf::from)
        .or(config.basis_dir)
        .context("캐시 디렉토리를 지정해주세요 (--dir 또는 ABEL_BASIS_DIR)")?;
    let methods = match matches.get_one::<String>("method") {
        Some(name) => vec![name.parse::<BasisMethod>()?],
        None => BasisMethod::ALL.to_vec(),
    };

    let store = DirectoryStore::new(&dir);
    println!("📂 {}", dir.display());
    for method in methods {
        let mut names = store.candidates(method)?;
        names.sort();
        for file_name in names {
            match BasisName::parse(method, &file_name) {
                Some(name) => println!(
                    "  {:<14} size={:<6} nbf={:<6} {}",
                    method.as_str(),
                    name.size,
                    name.num_basis_functions,
                    file_name
                ),
                None => println!("  {:<14} (해석 불가)        {}", method.as_str(), file_name),
            }
        }
    }
    Ok(())
}
