use crate::runtime::{
    Runtime,
    chart::ChartView,
    form::SimpleForm,
    metric::MetricView,
    table::DataTable,
    tabs::TabsPanel,
    wizard::WizardForm,
};
use panelkit_schema::ComponentDescriptor;

///
/// ComponentView
///
/// A mounted component. Read-only components (metrics, charts) are
/// resolved snapshots; interactive components (tables, forms, wizards,
/// tab panels) are state machines the shell drives.
///

#[derive(Debug)]
pub enum ComponentView {
    MetricCard(MetricView),
    DataTable(Box<DataTable>),
    SimpleForm(Box<SimpleForm>),
    WizardForm(Box<WizardForm>),
    Chart(ChartView),
    Tabs(Box<TabsPanel>),
}

/// Dispatch one descriptor to its component builder. The descriptor
/// union is closed, so there is no unknown-type arm: anything that
/// parsed builds.
#[must_use]
pub fn build_component(
    runtime: &Runtime,
    role: Option<&str>,
    descriptor: &ComponentDescriptor,
) -> ComponentView {
    match descriptor {
        ComponentDescriptor::MetricCard(props) => {
            ComponentView::MetricCard(MetricView::build(runtime, props))
        }
        ComponentDescriptor::DataTable(props) => {
            ComponentView::DataTable(Box::new(DataTable::new(props.clone())))
        }
        ComponentDescriptor::SimpleForm(props) => {
            ComponentView::SimpleForm(Box::new(SimpleForm::mount(runtime, props.clone())))
        }
        ComponentDescriptor::WizardForm(props) => {
            ComponentView::WizardForm(Box::new(WizardForm::mount(runtime, props.clone())))
        }
        ComponentDescriptor::Chart(props) => {
            ComponentView::Chart(ChartView::build(runtime, props))
        }
        ComponentDescriptor::TabsComponent(props) => {
            ComponentView::Tabs(Box::new(TabsPanel::mount(runtime, role, props.clone())))
        }
    }
}
