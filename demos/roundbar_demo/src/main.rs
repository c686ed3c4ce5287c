use roundbar_core::prelude::*;
use roundbar_ui::RoundCornerProgressBar;

const BARS: &str = r##"[
    { "progress": "30", "secondary_progress": "60", "padding": "5dp" },
    {
        "max": "8",
        "progress": "3",
        "corner_radius": "15dp",
        "progress_color": "#ff2e7d32",
        "secondary_progress_color": "#802e7d32",
        "background_color": "#ffe0e0e0",
        "gravity": "right"
    },
    { "orientation": "vertical", "gravity": "bottom", "progress": "75" }
]"##;

#[cfg(not(target_os = "android"))]
fn init_logging() {
    env_logger::init();
}

#[cfg(target_os = "android")]
fn init_logging() {
    android_logger::init_once(
        android_logger::Config::default().with_max_level(log::LevelFilter::Trace),
    );
}

fn report(name: &str, bar: &RoundCornerProgressBar) {
    let state = bar.state();
    log::info!(
        "{name}: {}/{} ({}px of {}px)",
        state.progress(),
        state.max(),
        state.progress_extent(),
        state.background_width().max(state.background_height()),
    );
}

fn dump(name: &str, scene: &Scene) {
    log::info!("{name}: {} node(s)", scene.nodes.len());
    for node in &scene.nodes {
        log::info!("  {node:?}");
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let sets: Vec<AttributeSet> = serde_json::from_str(BARS)?;

    with_density(Density::from_dpi(320.0), || -> anyhow::Result<()> {
        let available = Size::new(720.0, 1280.0);

        // Attribute-driven bars stacked top to bottom on one page.
        let mut page = Scene::new(Color::WHITE);
        let gap = dp_to_px(8.0);
        let mut y = 0.0;
        for (i, attrs) in sets.iter().enumerate() {
            let modifier = match attrs.orientation("orientation")? {
                Some(Orientation::Vertical) => Modifier::new().width(24.0).height(160.0),
                _ => Modifier::new().fill_max_width().height(24.0),
            };
            let bar = RoundCornerProgressBar::builder()
                .modifier(modifier)
                .build(attrs)?;
            let layout = bar.layout(available)?.translate(0.0, y);
            bar.paint(&layout, &mut page);
            y += layout.track.h + gap;
            report(&format!("attrs[{i}] at y={}", layout.track.y), &bar);
        }
        dump("page", &page);

        // Configured in code before the first layout pass, then updated.
        let blue = Color::from_argb(0xff1565c0);
        let bar = RoundCornerProgressBar::builder()
            .modifier(Modifier::new().size(200.0, 16.0))
            .max(250.0)
            .progress(100.0)
            .progress_colors(blue, blue.with_alpha(0x80))
            .build(&AttributeSet::new())?;
        let scene = bar.layout_and_paint(available)?;
        report("builder", &bar);
        dump("builder", &scene);

        bar.set_progress(250.0);
        bar.set_secondary_progress(125.0);
        let scene = bar.layout_and_paint(available)?;
        report("builder (full)", &bar);
        dump("builder (full)", &scene);

        Ok(())
    })
}
