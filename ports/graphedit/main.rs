/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use bpaf::Bpaf;
use euclid::default::Size2D;
use graphedit::config::EditorConfig;
use graphedit::desktop::EditorApp;
use graphedit::editor::GraphEditor;
use graphedit::graph::color::DEFAULT_PALETTE;
use graphedit::graph::{Graph, seed};
use graphedit::input::{KeyScheme, Keymap};
use log::{error, info, warn};
use std::path::PathBuf;

/// Interactive directed multigraph editor
#[derive(Debug, Clone, Bpaf)]
#[bpaf(options, version)]
struct CliOptions {
    /// Key scheme, "digits" or "mnemonic" (overrides the config file)
    #[bpaf(long, argument("SCHEME"))]
    scheme: Option<KeyScheme>,

    /// Read the configuration from PATH instead of the default location
    #[bpaf(long, argument("PATH"))]
    config: Option<PathBuf>,

    /// Start with N randomly placed vertices
    #[bpaf(long, argument("N"), fallback(0))]
    seed_vertices: usize,

    /// Add N random edges between the starting vertices
    #[bpaf(long, argument("N"), fallback(0))]
    seed_edges: usize,

    /// Write the default configuration file and exit
    #[bpaf(long, switch)]
    write_default_config: bool,
}

const SEED_AREA: Size2D<f32> = Size2D::new(1000.0, 700.0);

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = cli_options().run();

    if options.write_default_config {
        let path = options.config.unwrap_or_else(EditorConfig::config_path);
        match EditorConfig::default().save_to(&path) {
            Ok(()) => info!("wrote default config to {}", path.display()),
            Err(e) => {
                error!("cannot write {}: {e}", path.display());
                std::process::exit(1);
            },
        }
        return Ok(());
    }

    let mut config = match &options.config {
        Some(path) => EditorConfig::load_from(path).unwrap_or_else(|e| {
            warn!("Ignoring config {}: {e}", path.display());
            EditorConfig::default()
        }),
        None => EditorConfig::load(),
    };
    if let Some(scheme) = options.scheme {
        config.keybinds.scheme = scheme;
    }

    let keymap = config.keymap().unwrap_or_else(|e| {
        warn!("Invalid key bindings, using defaults: {e}");
        Keymap::from_scheme(config.keybinds.scheme)
    });
    let palette = config
        .palette
        .entries()
        .unwrap_or_else(|_| DEFAULT_PALETTE.to_vec());
    info!("key scheme: {}", config.keybinds.scheme);

    let mut graph = Graph::new();
    if options.seed_vertices > 0 {
        let colors: Vec<_> = palette.iter().map(|&(color, _)| color).collect();
        let mut rng = rand::thread_rng();
        seed::seed_vertices(
            &mut graph,
            options.seed_vertices,
            SEED_AREA,
            &colors,
            &mut rng,
        );
        let added = seed::seed_random_edges(&mut graph, options.seed_edges, &mut rng);
        info!(
            "seeded {} vertices and {added} edges",
            graph.vertex_count()
        );
    }

    let editor = GraphEditor::with_graph(graph, keymap, config.palette.initial_color());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("GraphEdit")
            .with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native(
        "GraphEdit",
        native_options,
        Box::new(|_cc| Ok(Box::new(EditorApp::new(editor, palette)))),
    )
}
