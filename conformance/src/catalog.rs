//! The case catalog: every request the suite sends and what it expects back.
//!
//! Cases are grouped per verb. Fixture lists are the boundary and
//! equivalence-class inputs for the 200-record collection; names follow the
//! `group_kind[fixture]` pattern so a failing case reads back to its input.

use serde::Serialize;
use serde_json::json;
use todo_core::{ApiError, Fixture, HttpRequest, NewTodo, TodoClient, TodoPatch, TodoReplacement};

use crate::expect::{BodyShape, Expectation};

pub const TODOS_MAX: i64 = 200;
pub const TODOS_HALF: i64 = TODOS_MAX / 2;

/// Titles the hosted collection is known to contain.
pub const KNOWN_TITLES: [&str; 5] = [
    "ut cupiditate sequi aliquam fuga maiores",
    "inventore saepe cumque et aut illum enim",
    "excepturi a et neque qui expedita vel voluptate",
    "numquam repellendus a magnam",
    "ipsam aperiam voluptates qui",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Group {
    Get,
    List,
    Create,
    Replace,
    Patch,
    Delete,
    Filter,
}

impl Group {
    pub const ALL: [Group; 7] = [
        Group::Get,
        Group::List,
        Group::Create,
        Group::Replace,
        Group::Patch,
        Group::Delete,
        Group::Filter,
    ];
}

/// One request and the outcome it must produce.
#[derive(Debug, Clone)]
pub struct Step {
    pub request: HttpRequest,
    pub expect: Expectation,
}

/// A named, independent check made of one or more steps run in order.
#[derive(Debug, Clone)]
pub struct Case {
    pub name: String,
    pub group: Group,
    pub steps: Vec<Step>,
}

impl Case {
    fn single(name: String, group: Group, request: HttpRequest, expect: Expectation) -> Self {
        Self {
            name,
            group,
            steps: vec![Step { request, expect }],
        }
    }
}

/// Every case, in group order.
pub fn catalog(client: &TodoClient) -> Result<Vec<Case>, ApiError> {
    select(client, &Group::ALL)
}

/// The cases of the given groups, in the order given.
pub fn select(client: &TodoClient, groups: &[Group]) -> Result<Vec<Case>, ApiError> {
    let mut cases = Vec::new();
    for group in groups {
        cases.extend(group_cases(client, *group)?);
    }
    Ok(cases)
}

fn group_cases(client: &TodoClient, group: Group) -> Result<Vec<Case>, ApiError> {
    Ok(match group {
        Group::Get => get_cases(client),
        Group::List => vec![list_all(client)],
        Group::Create => vec![create(client)?],
        Group::Replace => replace_cases(client)?,
        Group::Patch => patch_cases(client)?,
        Group::Delete => existing_ids().map(|id| delete(client, id)).collect(),
        Group::Filter => filter_cases(client),
    })
}

/// Ids at both ends and the middle of the collection.
pub fn existing_ids() -> impl Iterator<Item = i64> {
    [1, 2, TODOS_HALF, TODOS_MAX - 1, TODOS_MAX].into_iter()
}

/// Ids that address nothing: out of range, overflowing, or not integers.
pub fn missing_ids() -> Vec<Fixture> {
    vec![
        Fixture::Int(-1),
        Fixture::Int(0),
        Fixture::Int(TODOS_MAX + 1),
        Fixture::pow(TODOS_MAX as u32, 100),
        Fixture::Float(2.5),
        Fixture::text("test"),
        Fixture::text("@"),
        Fixture::text("тест"),
    ]
}

fn get_cases(client: &TodoClient) -> Vec<Case> {
    let positive = existing_ids().map(|id| {
        Case::single(
            format!("get_positive[{id}]"),
            Group::Get,
            client.build_get_todo(&Fixture::Int(id)),
            Expectation::status(200).with_body(BodyShape::Fields(vec![("id", json!(id))])),
        )
    });
    let negative = missing_ids().into_iter().map(|id| {
        Case::single(
            format!("get_negative[{id}]"),
            Group::Get,
            client.build_get_todo(&id),
            Expectation::status(404).with_body(BodyShape::EmptyObject),
        )
    });
    positive.chain(negative).collect()
}

fn list_all(client: &TodoClient) -> Case {
    Case::single(
        "get_all_positive".to_string(),
        Group::List,
        client.build_list_todos(),
        Expectation::status(200).with_body(BodyShape::Length(TODOS_MAX as usize)),
    )
}

fn create(client: &TodoClient) -> Result<Case, ApiError> {
    let input = NewTodo {
        title: "Todo title".to_string(),
        completed: false,
        user_id: 1,
    };
    let request = client.build_create_todo(&input)?;
    let expect = Expectation::status(201).with_body(BodyShape::Fields(vec![
        ("id", json!(TODOS_MAX + 1)),
        ("userId", json!(input.user_id)),
        ("title", json!(input.title)),
        ("completed", json!(input.completed)),
    ]));
    Ok(Case::single(
        "post_positive".to_string(),
        Group::Create,
        request,
        expect,
    ))
}

/// The service does not validate `userId` on PUT, so every variant is echoed.
fn replace_cases(client: &TodoClient) -> Result<Vec<Case>, ApiError> {
    let positive = [(1, 1), (1, 11), (1, 20), (2, 21), (7, 140), (10, 200)]
        .into_iter()
        .map(|(user_id, todo_id)| ("put_positive", Fixture::Int(user_id), Fixture::Int(todo_id)));
    let bad_user = [
        Fixture::Int(0),
        Fixture::Int(-1),
        Fixture::Int(-9_999_999_999_999),
        Fixture::Float(2.5),
        Fixture::text("test"),
        Fixture::text(" "),
        Fixture::text("-"),
        Fixture::Int(11),
    ]
    .into_iter()
    .map(|user_id| ("put_user_id_negative", user_id, Fixture::Int(1)));

    let mut cases = Vec::new();
    for (kind, user_id, todo_id) in positive.chain(bad_user) {
        let input = replacement(&user_id, &todo_id);
        let request = client.build_replace_todo(&todo_id, &input)?;
        let expect = Expectation::status(200).with_body(BodyShape::Fields(vec![
            ("title", json!(input.title)),
            ("completed", json!(input.completed)),
            ("userId", user_id.to_json()),
            ("id", todo_id.to_json()),
        ]));
        cases.push(Case::single(
            format!("{kind}[{user_id}-{todo_id}]"),
            Group::Replace,
            request,
            expect,
        ));
    }

    // An unknown target id surfaces as a server error.
    let bad_todo = [
        Fixture::Int(-1),
        Fixture::Int(0),
        Fixture::Float(2.5),
        Fixture::Int(TODOS_MAX + 1),
        Fixture::text("test"),
        Fixture::text(" "),
        Fixture::text("-"),
        Fixture::Int(10_000_000_000_000),
        Fixture::text("апи"),
    ];
    let user_id = Fixture::Int(3);
    for todo_id in bad_todo {
        let request = client.build_replace_todo(&todo_id, &replacement(&user_id, &todo_id))?;
        cases.push(Case::single(
            format!("put_todo_id_negative[{user_id}-{todo_id}]"),
            Group::Replace,
            request,
            Expectation::status(500),
        ));
    }
    Ok(cases)
}

/// The PUT body sent for a `(userId, id)` pair.
pub fn replacement(user_id: &Fixture, todo_id: &Fixture) -> TodoReplacement {
    TodoReplacement {
        title: format!("New title for user_id={user_id} and todo_id={todo_id}"),
        completed: true,
        user_id: user_id.clone(),
        id: todo_id.clone(),
    }
}

fn patch_cases(client: &TodoClient) -> Result<Vec<Case>, ApiError> {
    let mut cases = Vec::new();
    for todo_id in [1, 2, 10, 11, 200] {
        let title = format!("New title for todo_id={todo_id}");
        let request = client.build_patch_todo(&Fixture::Int(todo_id), &TodoPatch::title(&title))?;
        let expect = Expectation::status(200).with_body(BodyShape::Fields(vec![
            ("title", json!(title)),
            ("id", json!(todo_id)),
        ]));
        cases.push(Case::single(
            format!("patch_title_positive[{todo_id}]"),
            Group::Patch,
            request,
            expect,
        ));
    }
    for (todo_id, completed) in [(1, true), (2, true), (10, false), (11, false), (200, true)] {
        let request =
            client.build_patch_todo(&Fixture::Int(todo_id), &TodoPatch::completed(completed))?;
        let expect = Expectation::status(200).with_body(BodyShape::Fields(vec![
            ("completed", json!(completed)),
            ("id", json!(todo_id)),
        ]));
        cases.push(Case::single(
            format!("patch_completed_positive[{todo_id}-{completed}]"),
            Group::Patch,
            request,
            expect,
        ));
    }
    Ok(cases)
}

/// Confirms the record exists, then deletes it. Deletes are faked by the
/// service, so the record survives for later cases.
fn delete(client: &TodoClient, todo_id: i64) -> Case {
    let id = Fixture::Int(todo_id);
    Case {
        name: format!("delete_positive[{todo_id}]"),
        group: Group::Delete,
        steps: vec![
            Step {
                request: client.build_get_todo(&id),
                expect: Expectation::status(200)
                    .with_body(BodyShape::Fields(vec![("id", json!(todo_id))])),
            },
            Step {
                request: client.build_delete_todo(&id),
                expect: Expectation::status(200).with_body(BodyShape::EmptyObject),
            },
        ],
    }
}

fn filter_cases(client: &TodoClient) -> Vec<Case> {
    let out_of_domain = || {
        vec![
            Fixture::Int(0),
            Fixture::Int(-1),
            Fixture::Int(-9_999_999_999_999),
            Fixture::Float(2.5),
            Fixture::text("test"),
            Fixture::text(" "),
            Fixture::text("-"),
        ]
    };

    let positive: Vec<(&'static str, Vec<Fixture>)> = vec![
        ("userId", [1, 2, 5, 9, 10].map(Fixture::Int).to_vec()),
        ("id", [1, 2, 100, 199, 200].map(Fixture::Int).to_vec()),
        ("title", KNOWN_TITLES.map(Fixture::text).to_vec()),
        ("completed", vec![Fixture::Bool(true), Fixture::Bool(false)]),
    ];

    let mut bad_ids = out_of_domain();
    bad_ids.insert(4, Fixture::Int(TODOS_MAX + 1));
    let negative: Vec<(&'static str, Vec<Fixture>)> = vec![
        ("userId", out_of_domain()),
        ("id", bad_ids),
        (
            "title",
            vec![
                Fixture::Int(0),
                Fixture::Int(-1),
                Fixture::Float(2.5),
                Fixture::text("wrong title"),
                Fixture::text(" "),
                Fixture::text("-"),
            ],
        ),
        ("completed", out_of_domain()),
    ];

    let mut cases = Vec::new();
    for (field, values) in positive {
        for value in values {
            cases.push(Case::single(
                format!("filtering_by_{}_positive[{value}]", snake(field)),
                Group::Filter,
                client.build_filter_todos(&[(field, &value)]),
                Expectation::status(200).with_body(BodyShape::EachItem {
                    field,
                    value: value.to_json(),
                }),
            ));
        }
    }
    for (field, values) in negative {
        for value in values {
            cases.push(Case::single(
                format!("filtering_by_{}_negative[{value}]", snake(field)),
                Group::Filter,
                client.build_filter_todos(&[(field, &value)]),
                Expectation::status(200).with_body(BodyShape::EmptyArray),
            ));
        }
    }
    cases
}

fn snake(field: &str) -> &str {
    match field {
        "userId" => "user_id",
        "id" => "todo_id",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_core::HttpMethod;

    fn client() -> TodoClient {
        TodoClient::new("http://localhost:3000/todos")
    }

    fn count(cases: &[Case], group: Group) -> usize {
        cases.iter().filter(|c| c.group == group).count()
    }

    #[test]
    fn catalog_covers_every_group() {
        let cases = catalog(&client()).unwrap();
        assert_eq!(count(&cases, Group::Get), 13);
        assert_eq!(count(&cases, Group::List), 1);
        assert_eq!(count(&cases, Group::Create), 1);
        assert_eq!(count(&cases, Group::Replace), 23);
        assert_eq!(count(&cases, Group::Patch), 10);
        assert_eq!(count(&cases, Group::Delete), 5);
        assert_eq!(count(&cases, Group::Filter), 45);
    }

    #[test]
    fn case_names_are_unique() {
        let cases = catalog(&client()).unwrap();
        let mut names: Vec<_> = cases.iter().map(|c| c.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), cases.len());
    }

    #[test]
    fn select_keeps_requested_order() {
        let cases = select(&client(), &[Group::Create, Group::List]).unwrap();
        let groups: Vec<_> = cases.iter().map(|c| c.group).collect();
        assert_eq!(groups, vec![Group::Create, Group::List]);
    }

    #[test]
    fn missing_ids_include_overflow() {
        assert!(missing_ids()
            .iter()
            .any(|id| matches!(id, Fixture::BigInt(digits) if digits.len() == 231)));
    }

    #[test]
    fn create_expects_next_id() {
        let case = create(&client()).unwrap();
        assert_eq!(case.steps[0].request.method, HttpMethod::Post);
        let BodyShape::Fields(fields) = &case.steps[0].expect.body else {
            panic!("expected field checks");
        };
        assert!(fields.contains(&("id", json!(201))));
    }

    #[test]
    fn replace_with_bad_target_expects_server_error() {
        let cases = replace_cases(&client()).unwrap();
        let case = cases
            .iter()
            .find(|c| c.name == "put_todo_id_negative[3-апи]")
            .unwrap();
        assert_eq!(case.steps[0].expect, Expectation::status(500));
        assert!(case.steps[0].request.path.ends_with("/%D0%B0%D0%BF%D0%B8"));
    }

    #[test]
    fn replace_echoes_loose_user_ids() {
        let cases = replace_cases(&client()).unwrap();
        let case = cases
            .iter()
            .find(|c| c.name == "put_user_id_negative[2.5-1]")
            .unwrap();
        let BodyShape::Fields(fields) = &case.steps[0].expect.body else {
            panic!("expected field checks");
        };
        assert!(fields.contains(&("userId", json!(2.5))));
    }

    #[test]
    fn delete_checks_existence_then_deletes() {
        let case = delete(&client(), TODOS_HALF);
        let methods: Vec<_> = case.steps.iter().map(|s| s.request.method).collect();
        assert_eq!(methods, vec![HttpMethod::Get, HttpMethod::Delete]);
    }

    #[test]
    fn title_filters_query_by_title() {
        let cases = filter_cases(&client());
        let case = cases
            .iter()
            .find(|c| c.name == "filtering_by_title_positive[numquam repellendus a magnam]")
            .unwrap();
        assert!(case.steps[0]
            .request
            .path
            .ends_with("?title=numquam%20repellendus%20a%20magnam"));
    }

    #[test]
    fn completed_filters_use_json_booleans() {
        let cases = filter_cases(&client());
        let case = cases
            .iter()
            .find(|c| c.name == "filtering_by_completed_positive[true]")
            .unwrap();
        assert!(case.steps[0].request.path.ends_with("?completed=true"));
    }
}
