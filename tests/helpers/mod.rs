use workflow_engine::parse::types::*;

// =============================================================================
// Node builders
// =============================================================================

pub fn start(id: &str) -> WorkflowNode {
    WorkflowNode::Start(NodeBase {
        id: id.into(),
        position: Position::default(),
        data: LabelData {
            label: "Start Node".into(),
        },
    })
}

pub fn end(id: &str) -> WorkflowNode {
    WorkflowNode::End(NodeBase {
        id: id.into(),
        position: Position::default(),
        data: LabelData {
            label: "End Node".into(),
        },
    })
}

pub fn conditional(id: &str) -> WorkflowNode {
    WorkflowNode::Conditional(NodeBase {
        id: id.into(),
        position: Position::default(),
        data: ConditionalData {
            label: "Conditional Node".into(),
            conditions: vec![],
        },
    })
}

pub fn form(id: &str, label: &str, fields: Vec<FormField>) -> WorkflowNode {
    WorkflowNode::Form(NodeBase {
        id: id.into(),
        position: Position::default(),
        data: FormData {
            label: label.into(),
            name: None,
            fields,
        },
    })
}

pub fn api(id: &str, label: &str, endpoint: &str) -> WorkflowNode {
    WorkflowNode::Api(NodeBase {
        id: id.into(),
        position: Position::default(),
        data: ApiData {
            label: label.into(),
            method: HttpMethod::Post,
            endpoint: endpoint.into(),
            selected_fields: Some(vec![]),
        },
    })
}

pub fn api_with_selection(id: &str, selected: &[&str]) -> WorkflowNode {
    WorkflowNode::Api(NodeBase {
        id: id.into(),
        position: Position::default(),
        data: ApiData {
            label: "API".into(),
            method: HttpMethod::Post,
            endpoint: "https://api.example.com".into(),
            selected_fields: Some(selected.iter().map(|s| s.to_string()).collect()),
        },
    })
}

pub fn field(id: &str, name: &str, field_type: FieldType) -> FormField {
    FormField {
        id: id.into(),
        name: name.into(),
        field_type,
        required: None,
    }
}

pub fn text_field(id: &str, name: &str) -> FormField {
    field(id, name, FieldType::Text)
}

// =============================================================================
// Edge builders
// =============================================================================

pub fn edge(source: &str, target: &str) -> WorkflowEdge {
    WorkflowEdge::new(format!("e-{}-{}", source, target), source, target)
}

pub fn edges(pairs: &[(&str, &str)]) -> Vec<WorkflowEdge> {
    pairs.iter().map(|(s, t)| edge(s, t)).collect()
}

/// start → form → api → end, every node config valid.
pub fn linear_workflow() -> (Vec<WorkflowNode>, Vec<WorkflowEdge>) {
    let nodes = vec![
        start("0"),
        form("1", "Signup", vec![text_field("f1", "Email")]),
        api("2", "Submit", "https://api.example.com/signup"),
        end("3"),
    ];
    let edges = edges(&[("0", "1"), ("1", "2"), ("2", "3")]);
    (nodes, edges)
}
