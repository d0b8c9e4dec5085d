//! Shared fixture config for runtime tests: a small people tool with two
//! resources, reference columns, and a dashboard page.

use crate::runtime::Runtime;
use panelkit_schema::AppConfig;

pub(crate) const PEOPLE_TOOL: &str = r#"{
    "app": {
        "name": "People Tool",
        "description": "A modular internal tool driven by configuration",
        "version": "1.0.0"
    },
    "auth": {
        "roles": ["Admin", "Manager", "Employee"],
        "users": [
            {"id": "1", "name": "Admin User", "email": "admin@example.com", "password": "admin123", "role": "Admin"},
            {"id": "2", "name": "Manager User", "email": "manager@example.com", "password": "manager123", "role": "Manager"},
            {"id": "3", "name": "Employee User", "email": "employee@example.com", "password": "employee123", "role": "Employee"}
        ]
    },
    "resources": {
        "departments": {
            "actions": ["getList", "getOne", "create", "update", "delete"],
            "permissions": {
                "Admin": ["*"],
                "Manager": ["getList", "getOne"],
                "Employee": ["getList"]
            },
            "fields": {
                "name": {"type": "text", "required": true},
                "description": {"type": "text"}
            },
            "data": [
                {"id": "1", "name": "Engineering", "description": "Product development"},
                {"id": "2", "name": "Marketing", "description": "Marketing and sales operations"},
                {"id": "3", "name": "HR", "description": "People operations"}
            ]
        },
        "employees": {
            "actions": ["getList", "getOne", "create", "update", "delete"],
            "permissions": {
                "Admin": ["*"],
                "Manager": ["getList", "getOne", "create", "update"],
                "Employee": ["getList", "getOne"]
            },
            "fields": {
                "name": {"type": "text", "required": true},
                "email": {"type": "text", "required": true},
                "department_id": {
                    "type": "reference",
                    "required": true,
                    "reference": {"resource": "departments", "displayField": "name"}
                },
                "position": {"type": "text"},
                "salary": {"type": "number", "required": true},
                "active": {"type": "boolean"},
                "hired_on": {"type": "date"}
            },
            "data": [
                {"id": "1", "name": "John Doe", "email": "john@example.com", "department_id": "1", "department_name": "Engineering", "position": "Senior Engineer", "salary": 85000, "active": true, "hired_on": "2021-03-15"},
                {"id": "2", "name": "Jane Smith", "email": "jane@example.com", "department_id": "2", "department_name": "Marketing", "position": "Marketing Manager", "salary": 75000, "active": true, "hired_on": "2020-07-01"},
                {"id": "3", "name": "Bob Johnson", "email": "bob@example.com", "department_id": "3", "department_name": "HR", "position": "HR Specialist", "salary": 65000, "active": false, "hired_on": "2019-11-20"},
                {"id": "4", "name": "Alice Williams", "email": "alice@example.com", "department_id": "1", "department_name": "Engineering", "position": "Engineer", "salary": 60000, "active": true, "hired_on": "2022-01-10"},
                {"id": "5", "name": "Charlie Brown", "email": "charlie@example.com", "department_id": "2", "department_name": "Marketing", "position": "Content Writer", "salary": 55000, "active": true, "hired_on": "2023-05-02"}
            ]
        }
    },
    "pages": [
        {
            "id": "dashboard",
            "title": "Dashboard",
            "path": "/dashboard",
            "icon": "bar-chart",
            "showInSidebar": true,
            "sidebarOrder": 1,
            "layoutType": "default",
            "zones": [
                {
                    "name": "metrics",
                    "components": [
                        {"type": "MetricCard", "props": {"title": "Total Employees", "resource": "employees", "field": "id", "aggregate": "count", "icon": "users"}},
                        {"type": "MetricCard", "props": {"title": "Average Salary", "resource": "employees", "field": "salary", "aggregate": "avg", "icon": "dollar-sign", "color": "purple"}}
                    ]
                },
                {
                    "name": "charts",
                    "components": [
                        {"type": "Chart", "props": {"title": "Employees by Department", "chartType": "bar", "resource": "employees", "xField": "department_name", "yField": "id", "transform": "count"}}
                    ]
                },
                {
                    "name": "tables",
                    "components": [
                        {"type": "DataTable", "props": {
                            "resource": "employees",
                            "columns": [
                                {"field": "name", "label": "Name", "type": "text"},
                                {"field": "email", "label": "Email", "type": "text"},
                                {"field": "department_id", "label": "Department", "type": "reference",
                                 "reference": {"resource": "departments", "displayField": "name", "valueField": "id"}},
                                {"field": "salary", "label": "Salary", "type": "number"},
                                {"field": "active", "label": "Active", "type": "boolean"}
                            ],
                            "formValidationRules": {
                                "name": {"required": true, "minLength": 2},
                                "email": {"required": true, "pattern": "^[^@]+@[^@]+\\.[^@]+$"}
                            }
                        }}
                    ]
                }
            ]
        },
        {
            "id": "admin",
            "title": "Administration",
            "path": "/admin",
            "icon": "settings",
            "showInSidebar": true,
            "sidebarOrder": 2,
            "roleAccess": ["Admin"],
            "layoutType": "tabs",
            "zones": [
                {"name": "departments", "components": [
                    {"type": "DataTable", "props": {
                        "resource": "departments",
                        "columns": [{"field": "name", "type": "text"}]
                    }}
                ]}
            ]
        }
    ]
}"#;

pub(crate) fn people_tool() -> AppConfig {
    serde_json::from_str(PEOPLE_TOOL).unwrap()
}

pub(crate) fn runtime() -> Runtime {
    Runtime::new(people_tool()).unwrap()
}
