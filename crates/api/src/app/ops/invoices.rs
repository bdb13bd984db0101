use std::sync::Arc;

use serde::Deserialize;

use invoicer_core::RecordId;
use invoicer_invoicing::{InvoiceFilter, InvoicePatch};

use crate::app::dto::InvoiceView;
use crate::app::registry::{OperationKind, Registry, parse_input, to_output};
use crate::app::services::InvoiceService;
use crate::context::Permission;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ListInput {
    #[serde(rename = "where")]
    filter: Option<InvoiceFilter>,
    skip: Option<usize>,
    limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct IdInput {
    id: RecordId,
}

#[derive(Debug, Deserialize)]
struct CreateInput {
    data: InvoicePatch,
}

#[derive(Debug, Deserialize)]
struct UpdateInput {
    id: RecordId,
    data: InvoicePatch,
}

pub fn register(registry: &mut Registry, service: Arc<InvoiceService>) {
    let svc = service.clone();
    registry.register(
        "invoices.list",
        OperationKind::Query,
        Permission::new("invoices.read"),
        move |input| {
            let input: ListInput = parse_input(input)?;
            let views: Vec<InvoiceView> = svc
                .list(input.filter, input.skip, input.limit)?
                .into_iter()
                .map(InvoiceView::from)
                .collect();
            to_output(&views)
        },
    );

    let svc = service.clone();
    registry.register(
        "invoices.get",
        OperationKind::Query,
        Permission::new("invoices.read"),
        move |input| {
            let input: IdInput = parse_input(input)?;
            to_output(&svc.get(input.id)?.map(InvoiceView::from))
        },
    );

    let svc = service.clone();
    registry.register(
        "invoices.create",
        OperationKind::Mutation,
        Permission::new("invoices.write"),
        move |input| {
            let input: CreateInput = parse_input(input)?;
            to_output(&InvoiceView::from(svc.create(input.data)?))
        },
    );

    let svc = service.clone();
    registry.register(
        "invoices.update",
        OperationKind::Mutation,
        Permission::new("invoices.write"),
        move |input| {
            let input: UpdateInput = parse_input(input)?;
            to_output(&InvoiceView::from(svc.update(input.id, input.data)?))
        },
    );

    let svc = service;
    registry.register(
        "invoices.delete",
        OperationKind::Mutation,
        Permission::new("invoices.write"),
        move |input| {
            let input: IdInput = parse_input(input)?;
            to_output(&InvoiceView::from(svc.delete(input.id)?))
        },
    );
}
