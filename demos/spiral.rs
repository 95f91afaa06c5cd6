use turtle_canvas::{
    Bridge, PlaybackOpts, PngSequenceSink, SharedEngine, SurfaceDesc, TurtleEngine,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut engine = TurtleEngine::default();
    engine.init(SurfaceDesc::from_layout(640.0, 1.0))?;
    let shared = SharedEngine::new(engine);

    let turtle = Bridge::new(shared.clone());
    let palette = ["#22c55e", "#38bdf8", "#f472b6", "gold"];
    for i in 0..72 {
        turtle.pencolor(palette[i % palette.len()]);
        turtle.forward(4.0 + f64::from(i as u32) * 2.0);
        turtle.right(59.0);
    }
    turtle.penup();
    turtle.goto(-120.0, -120.0);
    turtle.pendown();
    turtle.fillcolor("orange");
    turtle.begin_fill();
    turtle.circle(30.0, None);
    turtle.end_fill();

    let out_dir = std::path::Path::new("target").join("spiral_frames");
    let mut sink = PngSequenceSink::new(&out_dir);
    let stats = shared.lock().play_into(
        &mut sink,
        PlaybackOpts {
            every_nth: 10,
            max_frames: 100_000,
        },
    )?;

    eprintln!(
        "wrote {} of {} frames to {}",
        stats.frames_written,
        stats.frames_played,
        out_dir.display()
    );
    Ok(())
}
