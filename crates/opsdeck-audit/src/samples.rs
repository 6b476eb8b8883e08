//! Built-in demo payload, mixing the nested and flat record shapes

use serde_json::{json, Value};

/// Demo audit payload used when no log source is configured
pub fn sample_payload() -> Value {
    json!([
        {
            "id": "log_1001",
            "timestamp": "2023-10-24T08:12:45Z",
            "user": {"name": "Sarah Connor", "email": "sarah.connor@opsdeck.local"},
            "action": {"label": "User Login", "type": "auth"},
            "ip": "192.168.1.24",
            "status": "Success",
            "details": "Logged in with SSO"
        },
        {
            "id": "log_1002",
            "timestamp": "2023-10-24T09:03:10Z",
            "userName": "Kyle Reese",
            "userEmail": "kyle.reese@opsdeck.local",
            "action": "Failed Login Attempt",
            "ip": "203.0.113.7",
            "status": "Failed",
            "details": "Invalid password (3rd attempt)"
        },
        {
            "id": "log_1003",
            "timestamp": "2023-10-24T09:45:00Z",
            "user": {"name": "Miles Dyson", "email": "miles.dyson@opsdeck.local"},
            "action": {"label": "Updated Server Config"},
            "ip": "10.0.4.18",
            "status": "Success",
            "details": "Changed max connections on web-03 from 200 to 400"
        },
        {
            "id": "log_1004",
            "timestamp": "2023-10-24T11:20:31Z",
            "userName": "John Connor",
            "userEmail": "john.connor@opsdeck.local",
            "action": "Exported Report",
            "ip": "192.168.1.31",
            "status": "Success",
            "details": "Exported \"Q3 Fleet Health\" as PDF"
        },
        {
            "id": "log_1005",
            "timestamp": "2023-10-24T23:59:00Z",
            "user": {"name": "Sarah Connor", "email": "sarah.connor@opsdeck.local"},
            "action": {"label": "Deleted User"},
            "ip": "192.168.1.24",
            "status": "Warning",
            "details": "Removed inactive account t800@opsdeck.local"
        },
        {
            "id": "log_1006",
            "timestamp": "2023-10-25T00:00:01Z",
            "userName": "Kyle Reese",
            "action": "Failed Login Attempt",
            "ip": "203.0.113.7",
            "status": "Failed"
        },
        {
            "timestamp": "2023-10-25T07:30:12Z",
            "user": {"name": "Miles Dyson"},
            "action": {"label": "Restarted Service"},
            "ip": "10.0.4.18",
            "status": "Success",
            "details": "Restarted api-gateway on web-01"
        },
        {
            "id": "log_1008",
            "timestamp": "2023-10-25T10:05:44Z",
            "userName": "Grace Harper",
            "userEmail": "grace.harper@opsdeck.local",
            "action": "Changed Role",
            "ip": "172.16.2.9",
            "status": "Success",
            "details": "Promoted Dani Ramos from Employee to Manager"
        },
        {
            "id": "log_1009",
            "timestamp": "not-a-timestamp",
            "action": "Scheduled Backup",
            "status": "Pending"
        },
        {
            "id": "log_1010",
            "timestamp": "2023-10-26T14:48:09Z",
            "user": {"name": "Dani Ramos", "email": "dani.ramos@opsdeck.local"},
            "action": {"label": "User Login"},
            "ip": "192.168.1.77",
            "status": "Success"
        },
        {
            "id": "log_1011",
            "timestamp": "2023-10-26T16:02:27Z",
            "userName": "John Connor",
            "userEmail": "john.connor@opsdeck.local",
            "action": "Failed Login Attempt",
            "ip": "192.168.1.31",
            "status": "Failed",
            "details": "Account locked after 5 attempts"
        },
        {
            "id": "log_1012",
            "timestamp": "2023-10-27T08:00:00Z",
            "user": {"name": "Grace Harper", "email": "grace.harper@opsdeck.local"},
            "action": {"label": "Updated Server Config"},
            "ip": "172.16.2.9",
            "status": "Success",
            "details": "Rotated TLS certificates on lb-02"
        }
    ])
}
