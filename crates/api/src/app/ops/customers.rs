use std::sync::Arc;

use serde::Deserialize;

use invoicer_core::RecordId;
use invoicer_customers::{CustomerFilter, CustomerPatch};

use crate::app::registry::{OperationKind, Registry, parse_input, to_output};
use crate::app::services::CustomerService;
use crate::context::Permission;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ListInput {
    #[serde(rename = "where")]
    filter: Option<CustomerFilter>,
    skip: Option<usize>,
    limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct IdInput {
    id: RecordId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateInput {
    customer_number: String,
    data: CustomerPatch,
}

#[derive(Debug, Deserialize)]
struct UpdateInput {
    id: RecordId,
    data: CustomerPatch,
}

pub fn register(registry: &mut Registry, service: Arc<CustomerService>) {
    let svc = service.clone();
    registry.register(
        "customers.list",
        OperationKind::Query,
        Permission::new("customers.read"),
        move |input| {
            let input: ListInput = parse_input(input)?;
            let customers = svc.list(input.filter, input.skip, input.limit)?;
            to_output(&customers)
        },
    );

    let svc = service.clone();
    registry.register(
        "customers.get",
        OperationKind::Query,
        Permission::new("customers.read"),
        move |input| {
            let input: IdInput = parse_input(input)?;
            to_output(&svc.get(input.id)?)
        },
    );

    let svc = service.clone();
    registry.register(
        "customers.create",
        OperationKind::Mutation,
        Permission::new("customers.write"),
        move |input| {
            let input: CreateInput = parse_input(input)?;
            to_output(&svc.create(input.customer_number, input.data)?)
        },
    );

    let svc = service.clone();
    registry.register(
        "customers.update",
        OperationKind::Mutation,
        Permission::new("customers.write"),
        move |input| {
            let input: UpdateInput = parse_input(input)?;
            to_output(&svc.update(input.id, input.data)?)
        },
    );

    let svc = service;
    registry.register(
        "customers.delete",
        OperationKind::Mutation,
        Permission::new("customers.write"),
        move |input| {
            let input: IdInput = parse_input(input)?;
            to_output(&svc.delete(input.id)?)
        },
    );
}
