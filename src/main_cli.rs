use groupmap::descriptor::Descriptor;
use groupmap::error::AppError;
use groupmap::field::Field;
use groupmap::field_generator::FieldGenerator;
use groupmap::group_finder::find_groups;
use groupmap::pipeline::{build_marked_field, MarkedField};
use groupmap::png_renderer::PngRenderer;
use groupmap::svg_renderer::SvgRenderer;
use log::{error, info};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Default)]
struct CliArgs {
    width: Option<usize>,
    height: Option<usize>,
    colors: Option<usize>,
    seed: Option<u64>,
    descriptor: Option<PathBuf>,
    svg: Option<PathBuf>,
    png: Option<PathBuf>,
    json: Option<PathBuf>,
}

fn print_help() {
    println!("Color group finder");
    println!("\nUsage: groupmap-cli [OPTIONS]");
    println!("\nOptions:");
    println!("  --width <n>          Field width in cells (default: 40)");
    println!("  --height <n>         Field height in cells (default: 20)");
    println!("  --colors <1-10>      Number of palette colors (default: 4)");
    println!("  --seed <n>           Fixed seed for a reproducible field");
    println!("  --descriptor <path>  Read width/height/colors from a descriptor file");
    println!("  --svg <path>         Write the SVG rendering");
    println!("  --png <path>         Write a PNG rendering");
    println!("  --json <path>        Write the marked field as JSON");
    println!("  --help               Show this help message");
    println!("\nExample:");
    println!("  groupmap-cli --width 30 --height 20 --colors 3 --svg field.svg");
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T, AppError> {
    let value = value.ok_or_else(|| AppError::Config(format!("{} needs a value", flag)))?;
    value
        .parse()
        .map_err(|_| AppError::Config(format!("{} expects a number, got {:?}", flag, value)))
}

fn parse_path(flag: &str, value: Option<&String>) -> Result<PathBuf, AppError> {
    value
        .map(PathBuf::from)
        .ok_or_else(|| AppError::Config(format!("{} needs a value", flag)))
}

fn parse_args(args: &[String]) -> Result<Option<CliArgs>, AppError> {
    let mut cli = CliArgs::default();

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = args.get(i + 1);
        match flag {
            "--width" => cli.width = Some(parse_number(flag, value)?),
            "--height" => cli.height = Some(parse_number(flag, value)?),
            "--colors" => cli.colors = Some(parse_number(flag, value)?),
            "--seed" => cli.seed = Some(parse_number(flag, value)?),
            "--descriptor" => cli.descriptor = Some(parse_path(flag, value)?),
            "--svg" => cli.svg = Some(parse_path(flag, value)?),
            "--png" => cli.png = Some(parse_path(flag, value)?),
            "--json" => cli.json = Some(parse_path(flag, value)?),
            "--help" => return Ok(None),
            other => return Err(AppError::Config(format!("unknown option {}", other))),
        }
        i += 2;
    }

    Ok(Some(cli))
}

fn resolve_descriptor(cli: &CliArgs) -> Result<Descriptor, AppError> {
    let mut descriptor = match &cli.descriptor {
        Some(path) => Descriptor::load(path)?,
        None => Descriptor {
            width: 40,
            height: 20,
            num_colors: 4,
        },
    };

    // Explicit flags win over the descriptor file
    descriptor.width = cli.width.unwrap_or(descriptor.width);
    descriptor.height = cli.height.unwrap_or(descriptor.height);
    descriptor.num_colors = cli.colors.unwrap_or(descriptor.num_colors);
    descriptor.validate()?;
    Ok(descriptor)
}

fn print_field_ascii(field: &Field) {
    for row in field.rows() {
        for cell in row {
            // Marked cells are shown in upper case
            let ch = if cell.marked {
                cell.color.symbol().to_ascii_uppercase()
            } else {
                cell.color.symbol()
            };
            print!("{}", ch);
        }
        println!();
    }
}

fn print_summary(marked: &MarkedField) {
    let groups = find_groups(&marked.field);
    let total_cells = marked.field.height() * marked.field.width();

    println!("\nGroups: {}", groups.len());
    println!(
        "Largest group: {} cells of {} ({:.1}% of the field)",
        marked.max_group.len(),
        marked.group_color().name(),
        marked.max_group.len() as f64 / total_cells as f64 * 100.0
    );
    if let Some(&start) = marked.max_group.first() {
        println!("Starts at row {}, column {}", start.row, start.col);
    }
}

fn write_outputs(cli: &CliArgs, marked: &MarkedField) -> Result<(), AppError> {
    if let Some(path) = &cli.svg {
        fs::write(path, SvgRenderer::render(&marked.field)?)?;
        info!("SVG saved as: {}", path.display());
    }
    if let Some(path) = &cli.png {
        PngRenderer::render_to_image(&marked.field).save(path)?;
        info!("PNG saved as: {}", path.display());
    }
    if let Some(path) = &cli.json {
        fs::write(path, serde_json::to_string_pretty(&marked.field)?)?;
        info!("JSON saved as: {}", path.display());
    }
    Ok(())
}

fn run(args: &[String]) -> Result<(), AppError> {
    let cli = match parse_args(args)? {
        Some(cli) => cli,
        None => {
            print_help();
            return Ok(());
        }
    };

    let descriptor = resolve_descriptor(&cli)?;
    let mut generator = match cli.seed {
        Some(seed) => FieldGenerator::new(seed),
        None => FieldGenerator::from_time(),
    };
    let marked = build_marked_field(&descriptor, &mut generator)?;

    print_field_ascii(&marked.field);
    print_summary(&marked);
    write_outputs(&cli, &marked)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}
