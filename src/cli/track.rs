use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::{
    display::{render_dump, run_console_display},
    tracker::{
        args::TrackArgs,
        shutdown::detect_shutdown,
        source::simulated::SimulatedSource,
        Tracker,
    },
    utils::clock::DefaultClock,
};

/// Processes the `track` command. Runs the simulated source through the tracker until it runs
/// out of updates or Ctrl-C is pressed, then prints the log.
pub async fn process_track_command(args: TrackArgs) -> Result<()> {
    let shutdown = CancellationToken::new();
    let source = SimulatedSource::new(args.simulation(), Box::new(DefaultClock));
    let tracker = Tracker::new(source, args.tracker(), DefaultClock, &shutdown);
    let reader = tracker.reader();

    info!("Tracking with calendar zone {}", args.zone);

    let (_, tracker_result, _) = tokio::join!(
        detect_shutdown(shutdown.clone()),
        async {
            let result = tracker.run().await;
            shutdown.cancel();
            result
        },
        run_console_display(reader.clone(), args.dump_interval()),
    );
    tracker_result?;

    let dump = reader.dump_log();
    if args.json {
        print!("{}", dump.to_json_lines()?);
    } else {
        print!("{}", render_dump(&dump));
    }
    if reader.failure_count() > 0 {
        println!("{} location updates failed", reader.failure_count());
    }
    Ok(())
}
