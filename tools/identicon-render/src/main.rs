// Command line front end for the nine-block identicon renderer.
//
// Usage:
//   identicon-render render <code> <size> [-o out.png] [--patch-size N]
//                    [--background #rrggbb] [--threshold T]
//                    [--layout reference|disjoint] [--filter catrom|bicubic|bilinear]
//                    [--config cfg.json]
//   identicon-render sheet <first-code> <count> <size> [-o out.png] [options...]
//   identicon-render compare <a.png> <b.png>
//   identicon-render patches

use std::error::Error;
use std::process;

use identicon_render::{compare_buffers, render_sheet};
use nineblock::patch::{PATCH_CATALOG, PATCH_GRIDS};
use nineblock::{export, IdentityCode, NineBlockRenderer, RendererConfig};

type CmdResult = Result<(), Box<dyn Error>>;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "render" => cmd_render(&args[2..]),
        "sheet" => cmd_sheet(&args[2..]),
        "compare" => cmd_compare(&args[2..]),
        "patches" => cmd_patches(),
        "-h" | "--help" | "help" => {
            print_usage();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        log::error!("{}", e);
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!("identicon-render: nine-block identicon tool");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  render <code> <size> [-o out.png] [options...]");
    eprintln!("      Render one code. Codes are decimal, negative decimal or 0x hex.");
    eprintln!();
    eprintln!("  sheet <first-code> <count> <size> [-o out.png] [options...]");
    eprintln!("      Render consecutive codes onto one contact sheet.");
    eprintln!();
    eprintln!("  compare <a.png> <b.png>");
    eprintln!("      Compare two images pixel by pixel; exits 1 when they differ.");
    eprintln!();
    eprintln!("  patches");
    eprintln!("      List the patch catalog.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --patch-size N   --background #rrggbb   --threshold T");
    eprintln!("  --layout reference|disjoint   --filter catrom|bicubic|bilinear");
    eprintln!("  --config cfg.json   (applied before the other options)");
}

/// Output path plus the renderer built from the trailing options.
struct Options {
    output: Option<String>,
    renderer: NineBlockRenderer,
}

fn parse_options(args: &[String]) -> Result<Options, Box<dyn Error>> {
    // The config file is the base the other flags override.
    let mut config = RendererConfig::default();
    if let Some(i) = args.iter().position(|a| a == "--config") {
        let path = args.get(i + 1).ok_or("--config needs a path")?;
        config = RendererConfig::load(path)?;
    }

    let mut output = None;
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = args
            .get(i + 1)
            .ok_or_else(|| format!("option {} needs a value", flag))?;
        match flag {
            "-o" => output = Some(value.clone()),
            "--config" => {}
            "--patch-size" => config.patch_size = value.parse()?,
            "--background" => config.background = value.parse()?,
            "--threshold" => config.guard_threshold = value.parse()?,
            "--layout" => config.field_layout = value.parse()?,
            "--filter" => config.resample_filter = value.parse()?,
            _ => return Err(format!("unknown option: {}", flag).into()),
        }
        i += 2;
    }

    Ok(Options {
        output,
        renderer: NineBlockRenderer::with_config(config)?,
    })
}

fn cmd_render(args: &[String]) -> CmdResult {
    if args.len() < 2 {
        return Err("usage: identicon-render render <code> <size> [-o out.png] [options...]".into());
    }
    let code: IdentityCode = args[0].parse()?;
    let size: u32 = args[1].parse()?;
    let opts = parse_options(&args[2..])?;

    let spec = opts.renderer.decode(code);
    println!("code {}: {:?}", code, spec);

    let image = opts.renderer.render(code, size)?;
    let output = opts
        .output
        .unwrap_or_else(|| format!("identicon_{:08x}_{}.png", code, size));
    export::save_png(&image, &output)?;
    println!("Saved: {}", output);
    Ok(())
}

fn cmd_sheet(args: &[String]) -> CmdResult {
    if args.len() < 3 {
        return Err(
            "usage: identicon-render sheet <first-code> <count> <size> [-o out.png] [options...]"
                .into(),
        );
    }
    let first: IdentityCode = args[0].parse()?;
    let count: u32 = args[1].parse()?;
    let size: u32 = args[2].parse()?;
    let opts = parse_options(&args[3..])?;

    let sheet = render_sheet(&opts.renderer, first, count, size)?;
    let output = opts
        .output
        .unwrap_or_else(|| format!("sheet_{:08x}_{}.png", first, count));
    export::save_png(&sheet, &output)?;
    println!("Saved {} identicons: {}", count, output);
    Ok(())
}

fn cmd_compare(args: &[String]) -> CmdResult {
    if args.len() < 2 {
        return Err("usage: identicon-render compare <a.png> <b.png>".into());
    }
    let a = export::load_png(&args[0])?;
    let b = export::load_png(&args[1])?;

    let result = compare_buffers(&a, &b).ok_or_else(|| {
        format!(
            "size mismatch: {}x{} vs {}x{}",
            a.width(),
            a.height(),
            b.width(),
            b.height()
        )
    })?;
    println!("{}", result);
    if !result.identical() {
        process::exit(1);
    }
    Ok(())
}

fn cmd_patches() -> CmdResult {
    println!("{:>3}  {:<10}  vertices (x,y on a {}x{} grid)", "#", "flags", PATCH_GRIDS, PATCH_GRIDS);
    for (i, patch) in PATCH_CATALOG.iter().enumerate() {
        let points: Vec<String> = patch
            .vertices
            .iter()
            .map(|&v| format!("({},{})", v as u32 % PATCH_GRIDS, v as u32 / PATCH_GRIDS))
            .collect();
        println!("{:>3}  {:<10}  {}", i, format!("{:?}", patch.flags), points.join(" "));
    }
    Ok(())
}
