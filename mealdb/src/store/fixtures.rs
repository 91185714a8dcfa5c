//! Shared test fixtures: a small but fully populated snapshot pair.

use crate::store::Store;
use serde_json::{json, Value};

pub(crate) fn sample_snapshot() -> Value {
    json!({
        "categories": [
            { "id": 1, "name": "Phở" },
            { "id": 2, "name": "Cơm" },
            { "id": 3, "name": "Trà sữa" }
        ],
        "restaurants": [
            {
                "id": 1, "slug": "pho-thin", "name": "Phở Thìn",
                "category": "Phở", "address": "13 Lò Đúc, Hà Nội",
                "location": { "lat": 21.011, "lng": 105.857 },
                "rating": 4.8, "menu": [41, 42],
                "reviews": [{ "author": "Tran Thi B", "rating": 5.0, "comment": "Ngon!" }]
            },
            {
                "id": 2, "slug": "com-tam-ba-ghien", "name": "Cơm Tấm Ba Ghiền",
                "category": "Cơm", "address": "84 Đặng Văn Ngữ, TP.HCM",
                "location": { "lat": 10.790, "lng": 106.677 },
                "rating": 4.5, "menu": [43]
            },
            {
                "id": 3, "slug": "tra-sua-nha-lam", "name": "Trà Sữa Nhà Làm",
                "category": "Trà sữa", "address": "5 Trúc Bạch, Hà Nội",
                "location": { "lat": 21.043, "lng": 105.842 },
                "rating": 4.9, "menu": [44]
            }
        ],
        "foods": [
            { "id": 41, "name": "Phở bò tái", "restaurantId": 1, "category": "Phở", "price": "55.000đ", "rating": 4.7 },
            { "id": 42, "name": "Phở gà", "restaurantId": 1, "category": "Phở", "price": "45.000đ", "rating": 4.9 },
            { "id": 43, "name": "Cơm tấm sườn bì", "restaurantId": 2, "category": "Cơm", "price": "60.000đ", "rating": 4.4 },
            { "id": 44, "name": "Trà sữa trân châu", "restaurantId": 3, "category": "Trà sữa", "price": "35.000đ", "rating": 4.9 }
        ],
        "banners": [
            { "id": 801, "title": "Giảm 50% món Phở", "image": "banners/pho50.png", "restaurantId": 1 }
        ],
        "users": [
            {
                "type": "legacy", "id": 5, "fullName": "Pham Quang Admin",
                "email": "admin@x.com", "phone": "0900000001", "roles": ["admin"]
            },
            {
                "type": "legacy", "id": 7, "fullName": "Tran Thi B",
                "email": "b@x.com", "phone": "0902000111", "roles": ["customer"],
                "defaultAddressId": 201,
                "defaultPayment": { "kind": "bank", "id": 301 }
            },
            {
                "type": "customer", "id": 8, "fullName": "Le Van C",
                "email": "c@x.com", "phone": "0903000222",
                "addresses": [
                    { "id": 202, "label": "Nhà", "street": "3 Trúc Bạch", "ward": "Trúc Bạch",
                      "district": "Ba Đình", "province": "Hà Nội", "isDefault": true }
                ],
                "wallet": {
                    "balance": 250000.0,
                    "transactions": [
                        { "amount": -45000.0, "label": "Thanh toán o2", "at": "2026-08-01T10:00:00Z" }
                    ]
                },
                "favorites": { "restaurants": [1], "foods": [42, 44] },
                "orderIds": ["o2", "o3", "o4", "o5"]
            },
            {
                "type": "shipper", "id": 9, "fullName": "Nguyen Van Ship",
                "email": "ship@x.com", "phone": "0904000333",
                "stats": { "rating": 4.6, "completed": 120, "completionRate": 0.97 },
                "vehicle": { "kind": "motorbike", "plate": "29-X1 123.45" }
            },
            {
                "type": "store", "id": 6, "storeName": "Bếp Nhà"
            }
        ],
        "auth": {
            "credentials": [
                { "accountId": 7, "email": "b@x.com", "phone": "0902000111",
                  "passwordHash": "x", "status": "active" },
                { "accountId": 99, "email": "ghost@x.com", "phone": "0905000444",
                  "passwordHash": "x", "status": "active" }
            ]
        },
        "addresses": [
            { "id": 201, "accountId": 7, "label": "Nhà", "recipient": "Tran Thi B",
              "street": "12 Hàng Bạc", "ward": "Hàng Bạc", "district": "Hoàn Kiếm",
              "province": "Hà Nội", "isDefault": true }
        ],
        "bankAccounts": [
            { "id": 301, "accountId": 7, "bankName": "VCB", "number": "****1234",
              "holder": "TRAN THI B", "isDefault": true },
            { "id": 302, "accountId": 9, "bankName": "ACB", "number": "****5678",
              "holder": "NGUYEN VAN SHIP", "isDefault": true }
        ],
        "cards": [
            { "id": 401, "accountId": 7, "brand": "Visa", "number": "****9012",
              "expiry": "12/27", "holder": "TRAN THI B", "isDefault": true }
        ],
        "sellers": [
            { "id": 501, "accountId": 5, "restaurants": [1], "status": "active" }
        ],
        "couriers": [
            { "id": 601, "accountId": 9, "vehicle": { "kind": "motorbike", "plate": "29-X1 123.45" },
              "serviceArea": ["Ba Đình", "Hoàn Kiếm"], "onDuty": true,
              "rating": 4.6, "completedTrips": 120 }
        ],
        "orders": [
            {
                "id": "o1", "userId": 7, "status": "delivered",
                "createdAt": "2026-08-10T11:30:00Z", "deliveredAt": "2026-08-10T12:10:00Z",
                "items": [{ "foodId": 42, "name": "Phở gà", "quantity": 1, "price": 45000.0, "restaurantId": 1 }],
                "payment": { "method": "cash", "subtotal": 45000.0, "shippingFee": 15000.0, "total": 60000.0 },
                "courierId": 9,
                "rating": { "stars": 5, "comment": "Nhanh" }
            },
            {
                "id": "o2", "userId": 8, "status": "pending", "groupId": "g1",
                "createdAt": "2026-08-20T18:00:00Z",
                "items": [{ "foodId": 41, "quantity": 2, "price": 55000.0, "restaurantId": 1 }]
            },
            {
                "id": "o3", "userId": 8, "status": "pending", "groupId": "g1",
                "createdAt": "2026-08-20T18:00:00Z",
                "items": [{ "foodId": 42, "quantity": 1, "price": 45000.0, "restaurantId": 1 }]
            },
            {
                "id": "o4", "userId": 8, "status": "pending", "groupId": "g1",
                "createdAt": "2026-08-20T18:00:00Z",
                "items": [{ "foodId": 44, "quantity": 1, "price": 35000.0, "restaurantId": 3 }]
            },
            {
                "id": "o5", "userId": 8, "status": "completed",
                "createdAt": "2026-08-15T12:00:00Z", "deliveredAt": "2026-08-15T12:40:00Z",
                "items": [{ "foodId": 43, "quantity": 1, "price": 60000.0, "restaurantId": 2 }]
            },
            {
                "id": "o6", "userId": 7, "status": "delivering",
                "createdAt": "2026-08-21T09:00:00Z",
                "items": [{ "foodId": 41, "quantity": 1, "price": 55000.0, "restaurantId": 1 }],
                "courierId": 9
            },
            {
                "id": "o7", "userId": 7, "status": "pending",
                "createdAt": "2026-08-22T12:00:00Z",
                "items": [{ "foodId": 43, "quantity": 1, "price": 60000.0, "restaurantId": 2 }]
            }
        ],
        "vouchers": [
            {
                "id": 901, "code": "FREESHIP", "kind": "amount", "value": 15000.0,
                "minOrder": 50000.0, "scope": { "kind": "global" },
                "startsAt": "2026-01-01T00:00:00Z", "endsAt": "2026-12-31T23:59:59Z",
                "active": true
            },
            {
                "id": 902, "code": "PHO10", "kind": "percent", "value": 10.0,
                "minOrder": 0.0, "scope": { "kind": "restaurant", "id": 1 },
                "active": false
            }
        ],
        "reviews": [
            { "id": 1001, "kind": "food", "targetId": 42, "rating": 5.0,
              "comment": "Tuyệt vời", "orderId": "o1", "userId": 7 },
            { "id": 1002, "kind": "restaurant", "targetId": 1, "rating": 4.0,
              "comment": "Đông nhưng đáng", "userId": 8 }
        ]
    })
}

pub(crate) fn sample_geography() -> Value {
    json!([
        {
            "id": 1, "name": "Hà Nội",
            "districts": [
                {
                    "id": 10, "provinceId": 1, "name": "Ba Đình",
                    "wards": [
                        { "id": 100, "districtId": 10, "name": "Phúc Xá" },
                        { "id": 101, "districtId": 10, "name": "Trúc Bạch" }
                    ]
                },
                {
                    "id": 11, "provinceId": 1, "name": "Hoàn Kiếm",
                    "wards": [
                        { "id": 110, "districtId": 11, "name": "Hàng Bạc" }
                    ]
                }
            ]
        },
        {
            "id": 2, "name": "Hồ Chí Minh",
            "districts": [
                {
                    "id": 20, "provinceId": 2, "name": "Quận 1",
                    "wards": [
                        { "id": 200, "districtId": 20, "name": "Bến Nghé" }
                    ]
                }
            ]
        }
    ])
}

pub(crate) fn sample_store() -> Store {
    Store::load(sample_snapshot(), sample_geography()).unwrap()
}
