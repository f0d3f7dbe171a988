use nbgather_types::{CellId, LiveUnit};

/// Build a live cell with an execution order.
pub fn cell(id: &str, text: &str, order: i64) -> LiveUnit {
    LiveUnit::new(CellId::new(id), text).with_execution_order(order)
}

/// The five-cell bokeh notebook: an import cell, an irrelevant data
/// cell, a figure cell, a line cell, and a show cell. Cells 1, 3, and
/// 5 form the backward slice of cell 5.
pub fn bokeh_cells() -> Vec<LiveUnit> {
    vec![
        cell(
            "72ce5eda-e03a-454b-bfdf-7d53c4bfa91f",
            "from bokeh.plotting import show, figure, output_notebook\noutput_notebook()",
            1,
        ),
        cell(
            "7243c0aa-cf06-4b2f-b557-2d1dcedda943",
            "x = [1,2,3,4,5]\ny = [21,9,15,17,4]\nprint('This is some irrelevant code')",
            2,
        ),
        cell(
            "c510bfd2-5ab5-4879-b877-8d993983c822",
            "p=figure(title='demo',x_axis_label='x',y_axis_label='y')",
            3,
        ),
        cell(
            "4e227548-1337-4894-991a-8f9a92523897",
            "p.line(x,y,line_width=2)",
            4,
        ),
        cell("5912d201-dca5-4e5b-ab8a-7ce383e86bbb", "show(p)", 5),
    ]
}
