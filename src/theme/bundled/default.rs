//! Default - dark launcher theme shipped with the binary

pub const THEME: &str = r##"{
  "#config": {
    "name": "Default",
    "version": 1,
    "author": "harbor"
  },
  "#base": {
    "font": "body",
    "font-size": 20,
    "font-color": "text",
    "align": "midleft"
  },
  "#resources": {
    "body": "DejaVuSans.ttf",
    "title": "DejaVuSans-Bold.ttf",
    "click": "click.wav",
    "accept": "accept.wav",
    "theme-music": "menu.ogg"
  },
  "#pallet": {
    "background": "#1b1e2b",
    "panel": "#262a3d",
    "text": "#e0e0e0",
    "muted": "#8a8fa8",
    "accent": "#3399ff",
    "highlight": "#ffffff"
  },
  "#schemes": {
    "Night": {
      "#pallet": {
        "accent": "#3399ff"
      }
    },
    "Ember": {
      "#pallet": {
        "accent": "#ff7a33",
        "panel": "#2d2420"
      }
    }
  },
  "#elements": {
    "header": {
      "area": [0, 0, 1.0, 48],
      "fill": "panel",
      "font": "title",
      "font-size": 26,
      "align": "center"
    },
    "footer": {
      "area": [0, -40, 1.0, 1.0],
      "fill": "panel",
      "font-size": 16,
      "font-color": "muted",
      "bar-spacing": 16
    }
  },
  "main_menu": {
    "background": {
      "area": [0, 0, 1.0, 1.0],
      "fill": "background",
      "music": "theme-music"
    },
    "#element:header:title": {
      "text": "Ports"
    },
    "body": {
      "area": [16, 56, -16, -48]
    },
    "menu": {
      "parent": "body",
      "area": [0, 0, 0.5, 1.0],
      "fill": "panel",
      "roundness": 6,
      "item-size": 32,
      "list": ["Featured", "All Ports", "Installed", "Settings", "Quit"],
      "options": ["featured", "all", "installed", "settings", "quit"],
      "select-fill": "accent",
      "select-font-color": "highlight",
      "allow-wrap": true,
      "focus": true,
      "select-sound": "click",
      "activate-sound": "accept"
    },
    "menu[desktop]": {
      "item-size": 28
    },
    "info": {
      "parent": "body",
      "area": [0.55, 0, 1.0, 64],
      "fill": "panel",
      "font-size": 18,
      "text": "Browse and install ports for your handheld. Press A to open a category.",
      "autoscroll": "marquee",
      "scroll-axis": "horizontal",
      "scroll-speed": 30,
      "scroll-amount": 2,
      "scroll-delay": [1500, 1000]
    },
    "#element:footer": {
      "bar": ["A: Select", "B: Back", null, "START: Options"]
    }
  },
  "message": {
    "background": {
      "area": [0, 0, 1.0, 1.0],
      "fill": "background"
    },
    "dialog": {
      "area": [0.1, 0.25, 0.9, 0.75],
      "fill": "panel",
      "outline": "accent",
      "thickness": 2,
      "roundness": 8,
      "text": "",
      "wrap": true,
      "align": "center"
    },
    "buttons": {
      "parent": "dialog",
      "area": [8, -44, -8, -8],
      "bar": ["Cancel", null, "OK"],
      "bar-spacing": 24,
      "select-fill": "accent",
      "selectedx": 1,
      "focus": true,
      "select-sound": "click",
      "activate-sound": "accept"
    }
  },
  "#override": {
    "message": {
      "dialog[!desktop]": {
        "font-size": 22
      }
    }
  }
}
"##;
