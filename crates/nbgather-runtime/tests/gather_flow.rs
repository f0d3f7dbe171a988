use std::sync::Arc;

use nbgather_resolver::{DependencyResolver, FixedFactory};
use nbgather_runtime::{CompletionKind, GatherConfig, GatherProvider, GatherReport};
use nbgather_testing::{bokeh_cells, EmptyResolver, FailingResolver, RecordingSink, ScriptedResolver};
use nbgather_types::{
    CellId, Fragment, GatherOutcome, LiveUnit, ReconstructedDocument, SessionId, UnitKind,
};

const SESSION: &str = "file:///notebooks/plot.ipynb";

fn open_provider(
    resolver: Arc<dyn DependencyResolver>,
) -> (GatherProvider, Arc<RecordingSink>, SessionId) {
    let sink = Arc::new(RecordingSink::new());
    let provider = GatherProvider::with_sink(
        GatherConfig::default(),
        Arc::new(FixedFactory::new(resolver)),
        Arc::clone(&sink) as Arc<_>,
    );
    let id = SessionId::new(SESSION);
    provider.open_session(id.clone(), "python");
    (provider, sink, id)
}

/// Resolver scripted with the bokeh backward slice of the `show(p)`
/// cell: import, figure, show. Cells 2 and 4 are irrelevant.
fn bokeh_resolver() -> ScriptedResolver {
    let cells = bokeh_cells();
    let target = cells[4].persistent_id.clone();
    ScriptedResolver::new().with_slice(
        target,
        vec![
            Fragment::new(cells[0].text.clone(), cells[0].persistent_id.clone()),
            Fragment::new(cells[2].text.clone(), cells[2].persistent_id.clone()),
            Fragment::new(cells[4].text.clone(), cells[4].persistent_id.clone()),
        ],
    )
}

async fn log_all(provider: &GatherProvider, id: &SessionId, cells: &[LiveUnit]) {
    for cell in cells {
        provider.log_execution(id, cell).await.unwrap();
    }
}

#[tokio::test]
async fn log_length_matches_number_of_appends() {
    let (provider, _sink, id) = open_provider(Arc::new(ScriptedResolver::new()));

    let mut count = 0;
    for cell in bokeh_cells() {
        provider.log_execution(&id, &cell).await.unwrap();
        count += 1;
        assert_eq!(provider.log_len(&id).await.unwrap(), count);
    }
}

#[tokio::test]
async fn reset_log_always_returns_to_zero() {
    let (provider, _sink, id) = open_provider(Arc::new(ScriptedResolver::new()));

    // Resetting an empty log is a successful no-op.
    provider.reset_log(&id).await.unwrap();
    assert_eq!(provider.log_len(&id).await.unwrap(), 0);

    log_all(&provider, &id, &bokeh_cells()).await;
    provider.reset_log(&id).await.unwrap();
    assert_eq!(provider.log_len(&id).await.unwrap(), 0);
}

#[tokio::test]
async fn first_execution_order_clears_log_implicitly() {
    let (provider, _sink, id) = open_provider(Arc::new(ScriptedResolver::new()));
    log_all(&provider, &id, &bokeh_cells()).await;
    assert_eq!(provider.log_len(&id).await.unwrap(), 5);

    // A fresh run restarts numbering at 1; the stale log must go.
    let rerun = nbgather_testing::cell("72ce5eda-e03a-454b-bfdf-7d53c4bfa91f", "restarted = True", 1);
    provider.log_execution(&id, &rerun).await.unwrap();
    assert_eq!(provider.log_len(&id).await.unwrap(), 1);
}

#[tokio::test]
async fn gathers_program_slice_to_script() {
    let (provider, sink, id) = open_provider(Arc::new(bokeh_resolver()));
    let cells = bokeh_cells();
    log_all(&provider, &id, &cells).await;

    let outcome = provider.gather_code(&id, &cells[4], true).await.unwrap();

    let expected = "# %%\nfrom bokeh.plotting import show, figure, output_notebook\noutput_notebook()\n\
                    # %%\np=figure(title='demo',x_axis_label='x',y_axis_label='y')\n\
                    # %%\nshow(p)";
    assert_eq!(
        outcome,
        GatherOutcome::Document(ReconstructedDocument::Script(expected.to_string()))
    );
    assert_eq!(sink.completions(), vec![CompletionKind::Script]);
}

#[tokio::test]
async fn gathers_program_slice_to_notebook() {
    let (provider, sink, id) = open_provider(Arc::new(bokeh_resolver()));
    let cells = bokeh_cells();
    log_all(&provider, &id, &cells).await;

    let outcome = provider.gather_code(&id, &cells[4], false).await.unwrap();

    let GatherOutcome::Document(ReconstructedDocument::Notebook(units)) = outcome else {
        panic!("expected notebook outcome");
    };
    assert_eq!(units.len(), 3);
    assert!(units.iter().all(|u| u.kind == UnitKind::Code));
    assert_eq!(
        units[0].source_lines,
        vec![
            "from bokeh.plotting import show, figure, output_notebook",
            "output_notebook()"
        ]
    );
    assert_eq!(units[2].source_lines, vec!["show(p)"]);
    assert_eq!(sink.completions(), vec![CompletionKind::Notebook]);
}

#[tokio::test]
async fn gather_is_idempotent_against_unchanged_log() {
    let (provider, _sink, id) = open_provider(Arc::new(bokeh_resolver()));
    let cells = bokeh_cells();
    log_all(&provider, &id, &cells).await;

    let first = provider.gather_code(&id, &cells[4], true).await.unwrap();
    let second = provider.gather_code(&id, &cells[4], true).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn gather_against_empty_log_is_unavailable_not_an_error() {
    let (provider, sink, id) = open_provider(Arc::new(bokeh_resolver()));
    let cells = bokeh_cells();
    provider.reset_log(&id).await.unwrap();

    let outcome = provider.gather_code(&id, &cells[4], true).await.unwrap();

    assert_eq!(outcome, GatherOutcome::Unavailable);
    assert_eq!(sink.completions(), vec![CompletionKind::Unavailable]);
}

#[tokio::test]
async fn empty_slice_reports_nothing_to_gather() {
    let (provider, sink, id) = open_provider(Arc::new(EmptyResolver));
    let cells = bokeh_cells();
    log_all(&provider, &id, &cells).await;

    let outcome = provider.gather_code(&id, &cells[4], true).await.unwrap();

    assert_eq!(outcome, GatherOutcome::NothingToGather);
    assert_eq!(sink.completions(), vec![CompletionKind::Empty]);
}

#[tokio::test]
async fn resolver_failure_is_reported_and_returned() {
    let (provider, sink, id) = open_provider(Arc::new(FailingResolver));
    let cells = bokeh_cells();
    log_all(&provider, &id, &cells).await;

    let result = provider.gather_code(&id, &cells[4], true).await;

    assert!(result.is_err());
    assert_eq!(sink.failures(), vec!["gather"]);
}

#[tokio::test]
async fn gather_reports_submitted_versus_gathered_stats() {
    let (provider, sink, id) = open_provider(Arc::new(bokeh_resolver()));
    let cells = bokeh_cells();
    log_all(&provider, &id, &cells).await;

    provider.gather_code(&id, &cells[4], true).await.unwrap();

    let stats = sink
        .reports()
        .into_iter()
        .find_map(|report| match report {
            GatherReport::Stats(stats) => Some(stats),
            _ => None,
        })
        .expect("stats report");
    assert_eq!(stats.cells_submitted, 5);
    assert_eq!(stats.lines_submitted, 8);
    assert_eq!(stats.cells_gathered, 3);
    assert_eq!(stats.lines_gathered, 4);
}

#[tokio::test]
async fn smart_select_maps_slice_onto_live_positions() {
    let cells = bokeh_cells();
    let target = cells[4].persistent_id.clone();
    let resolver = ScriptedResolver::new().with_slice(
        target,
        vec![
            Fragment::new(cells[0].text.clone(), cells[0].persistent_id.clone()),
            Fragment::new(cells[2].text.clone(), cells[2].persistent_id.clone()),
            Fragment::new(cells[4].text.clone(), cells[4].persistent_id.clone()),
            // A cell edited away since execution; must be skipped
            // without disturbing the other ranges.
            Fragment::new("ghost_of_deleted_cell()", CellId::new("gone")),
        ],
    );
    let (provider, _sink, id) = open_provider(Arc::new(resolver));
    log_all(&provider, &id, &cells).await;

    let ranges = provider.smart_select(&id, &cells[4], &cells).await.unwrap();

    let positions: Vec<(usize, usize)> = ranges.iter().map(|r| (r.start, r.end)).collect();
    assert_eq!(positions, vec![(0, 1), (2, 3), (4, 5)]);
}

#[tokio::test]
async fn smart_select_with_unavailable_gather_returns_no_ranges() {
    let (provider, sink, id) = open_provider(Arc::new(bokeh_resolver()));
    let cells = bokeh_cells();

    let ranges = provider.smart_select(&id, &cells[4], &cells).await.unwrap();

    assert!(ranges.is_empty());
    assert_eq!(sink.completions(), vec![CompletionKind::Unavailable]);
}
