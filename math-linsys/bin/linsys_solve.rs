use clap::{Parser, ValueEnum};
use math_linsys::api::handle_calculate_json;
use math_linsys::random::{practice_system, random_system};
use math_linsys::{
    LinearSystem, Method, SolveResult, SolverConfig, compare_methods, load_config, parse_system,
    solve_system,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::Read;
use std::process;

#[derive(Parser, Debug)]
#[command(
    name = "linsys_solve",
    about = "Solve a linear system step by step (Cramer, Gauss, Gauss-Jordan, LU)"
)]
struct Cli {
    /// Equations, e.g. "2x + 3y = 7" "x - y = 1"
    equations: Vec<String>,

    /// Solution method
    #[arg(long, value_enum, default_value_t = MethodChoice::Gauss)]
    method: MethodChoice,

    /// Ordered variable names, e.g. "xy" or "x,y" (defaults to x, y, z, ...)
    #[arg(long)]
    variables: Option<String>,

    /// Run every method and compare the answers
    #[arg(long)]
    all: bool,

    /// Print results as JSON instead of the step listing
    #[arg(long)]
    json: bool,

    /// Read a JSON calculate request from stdin and print the response
    #[arg(long)]
    api: bool,

    /// Solver settings file (.json or .toml)
    #[arg(long)]
    config: Option<String>,

    /// Decimals for scalars in the step listing (overrides the config file)
    #[arg(long)]
    precision: Option<usize>,

    /// Show the cofactor expansion of 3x3 and larger determinants
    #[arg(long, overrides_with = "no_expand_cofactors")]
    expand_cofactors: bool,

    /// Show only the value of det(A), without its cofactor expansion
    #[arg(long, overrides_with = "expand_cofactors")]
    no_expand_cofactors: bool,

    /// Solve a random N x N system instead of the given equations
    #[arg(long)]
    random: Option<usize>,

    /// Generate a non-singular system with an integer solution (with --random)
    #[arg(long)]
    practice: bool,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum MethodChoice {
    Cramer,
    Gauss,
    GaussJordan,
    Lu,
}

impl From<MethodChoice> for Method {
    fn from(choice: MethodChoice) -> Self {
        match choice {
            MethodChoice::Cramer => Method::CramersRule,
            MethodChoice::Gauss => Method::GaussElimination,
            MethodChoice::GaussJordan => Method::GaussJordan,
            MethodChoice::Lu => Method::LuDecomposition,
        }
    }
}

fn main() {
    env_logger::init();
    let args = Cli::parse();

    let config = match build_config(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(2);
        }
    };

    if args.api {
        let mut body = String::new();
        if let Err(e) = std::io::stdin().read_to_string(&mut body) {
            eprintln!("Error: failed to read request from stdin: {e}");
            process::exit(2);
        }
        println!("{}", handle_calculate_json(&body, &config));
        return;
    }

    let system = match load_system(&args, &config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(2);
        }
    };

    if args.all {
        let comparison = compare_methods(&system, &config);
        if args.json {
            let entries: Vec<_> = comparison
                .results
                .iter()
                .map(|(method, result)| result_json(*method, result))
                .collect();
            let out = serde_json::json!({
                "results": entries,
                "agree": comparison.agree(),
                "max_deviation": comparison.max_deviation(),
            });
            println!("{out}");
        } else {
            for (method, result) in &comparison.results {
                print_result(*method, result, &config);
            }
            match comparison.max_deviation() {
                Some(d) if comparison.agree() => {
                    println!("All successful methods agree (max deviation {d:.3e})")
                }
                Some(d) => println!("Methods DISAGREE (max deviation {d:.3e})"),
                None => println!("Fewer than two methods produced a solution"),
            }
        }
    } else {
        let method = Method::from(args.method);
        let result = solve_system(&system, method, &config);
        if args.json {
            println!("{}", result_json(method, &result));
        } else {
            print_result(method, &result, &config);
        }
        if !result.is_success() {
            process::exit(1);
        }
    }
}

fn build_config(args: &Cli) -> Result<SolverConfig, String> {
    let base = match &args.config {
        Some(path) => load_config(path).map_err(|e| format!("config '{path}': {e}"))?,
        None => SolverConfig::default(),
    };
    SolverConfig::builder()
        .epsilon(base.epsilon)
        .max_size(base.max_size)
        .precision(args.precision.unwrap_or(base.precision))
        .expand_cofactors(if args.no_expand_cofactors {
            false
        } else {
            args.expand_cofactors || base.expand_cofactors
        })
        .build()
        .map_err(|e| e.to_string())
}

fn load_system(args: &Cli, config: &SolverConfig) -> Result<LinearSystem, String> {
    if let Some(n) = args.random {
        if n > config.max_size {
            return Err(format!(
                "--random {n} exceeds the maximum system size {}",
                config.max_size
            ));
        }
        let mut rng: StdRng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let system = if args.practice {
            practice_system(n, config.epsilon, &mut rng).map(|(system, _)| system)
        } else {
            random_system(n, &mut rng)
        };
        return system.map_err(|e| e.to_string());
    }

    if args.equations.is_empty() {
        return Err("no equations given (pass equations or use --random N)".to_string());
    }
    let variables = match &args.variables {
        Some(list) => parse_variable_list(list),
        None => LinearSystem::default_variables(args.equations.len()),
    };
    parse_system(args.equations.as_slice(), &variables).map_err(|e| e.to_string())
}

fn parse_variable_list(list: &str) -> Vec<char> {
    list.chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect()
}

fn print_result(method: Method, result: &SolveResult, config: &SolverConfig) {
    println!("== {} ==", method.title());
    if let Some(trace) = result.trace() {
        for (i, line) in trace.lines().iter().enumerate() {
            println!("{:>3}. {}", i + 1, line);
        }
    }
    match result {
        SolveResult::Success { solution, .. } => {
            println!("=> {}", solution.display(config.precision))
        }
        SolveResult::NoUniqueSolution { reason, .. } => println!("=> No unique solution: {reason}"),
        SolveResult::ParseError(e) => println!("=> {e}"),
    }
    println!();
}

fn result_json(method: Method, result: &SolveResult) -> serde_json::Value {
    let solution = result.solution().map(|s| {
        s.assignments()
            .into_iter()
            .map(|(v, x)| (v.to_string(), serde_json::json!(x)))
            .collect::<serde_json::Map<_, _>>()
    });
    serde_json::json!({
        "method": method,
        "success": result.is_success(),
        "solution": solution,
        "reason": result.singularity().map(|r| r.to_string()),
        "error": result.parse_error().map(|e| e.to_string()),
        "steps": result.trace().map(|t| t.steps()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("linsys_solve").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cofactor_flags() {
        assert!(build_config(&cli(&[])).unwrap().expand_cofactors);
        assert!(!build_config(&cli(&["--no-expand-cofactors"])).unwrap().expand_cofactors);
        assert!(
            build_config(&cli(&["--no-expand-cofactors", "--expand-cofactors"]))
                .unwrap()
                .expand_cofactors
        );
    }

    #[test]
    fn test_random_size_is_bounded_before_generation() {
        let args = cli(&["--random", "13", "--practice", "--seed", "1"]);
        let config = build_config(&args).unwrap();
        let err = load_system(&args, &config).unwrap_err();
        assert!(err.contains("exceeds the maximum system size 8"), "{err}");

        let args = cli(&["--random", "4", "--practice", "--seed", "1"]);
        assert_eq!(load_system(&args, &config).unwrap().size(), 4);
    }

    #[test]
    fn test_variable_list() {
        assert_eq!(parse_variable_list("x, y,z"), vec!['x', 'y', 'z']);
    }
}
